//! SMTP-backed `VerificationNotifier` using lettre's async transport.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::ports::{NotificationError, VerificationNotifier};
use crate::domain::{EmailAddress, VerificationMessage};

/// Connection settings for the outbound mail relay.
#[derive(Clone)]
pub struct SmtpConfig {
    relay: String,
    username: String,
    password: Zeroizing<String>,
}

impl SmtpConfig {
    /// The authenticated username doubles as the sender address.
    pub fn new(
        relay: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            relay: relay.into(),
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    pub fn relay(&self) -> &str {
        &self.relay
    }
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("relay", &self.relay)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Errors raised while building the transport.
#[derive(Debug, thiserror::Error)]
pub enum SmtpSetupError {
    #[error("invalid sender address `{address}`: {message}")]
    Sender { address: String, message: String },
    #[error("invalid SMTP relay `{relay}`: {message}")]
    Relay { relay: String, message: String },
}

/// Sends verification messages through an authenticated SMTP relay.
#[derive(Clone)]
pub struct SmtpVerificationNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpVerificationNotifier {
    /// Build the transport. No connection is opened until the first send.
    pub fn new(config: &SmtpConfig) -> Result<Self, SmtpSetupError> {
        let sender: Mailbox = config
            .username
            .parse()
            .map_err(|err: lettre::address::AddressError| SmtpSetupError::Sender {
                address: config.username.clone(),
                message: err.to_string(),
            })?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.relay)
            .map_err(|err| SmtpSetupError::Relay {
                relay: config.relay.clone(),
                message: err.to_string(),
            })?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.to_string(),
            ))
            .build();
        Ok(Self { transport, sender })
    }
}

fn build_message(
    sender: &Mailbox,
    recipient: &EmailAddress,
    message: &VerificationMessage,
) -> Result<Message, NotificationError> {
    let to: Mailbox = recipient
        .as_ref()
        .parse()
        .map_err(|err: lettre::address::AddressError| NotificationError::build(err.to_string()))?;
    Message::builder()
        .from(sender.clone())
        .to(to)
        .subject(message.subject.clone())
        .header(ContentType::TEXT_HTML)
        .body(message.html_body.clone())
        .map_err(|err| NotificationError::build(err.to_string()))
}

#[async_trait]
impl VerificationNotifier for SmtpVerificationNotifier {
    async fn send(
        &self,
        recipient: &EmailAddress,
        message: &VerificationMessage,
    ) -> Result<(), NotificationError> {
        let email = build_message(&self.sender, recipient, message)?;
        let response = self
            .transport
            .send(email)
            .await
            .map_err(|err| NotificationError::transport(err.to_string()))?;
        debug!(code = %response.code(), "verification message accepted by relay");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{UserRole, VerificationPin};
    use rstest::rstest;

    fn message() -> VerificationMessage {
        let pin = VerificationPin::from_code(4821).expect("valid pin");
        VerificationMessage::compose(&UserRole::Individual, &pin)
    }

    #[rstest]
    fn message_is_html_with_subject_and_recipient() {
        let sender: Mailbox = "noreply@foodshare.test".parse().expect("sender");
        let recipient = EmailAddress::new("ada@example.com").expect("email");
        let email = build_message(&sender, &recipient, &message()).expect("message builds");

        let raw = String::from_utf8(email.formatted()).expect("utf8 message");
        assert!(raw.contains("To: ada@example.com"));
        assert!(raw.contains("Subject: Don't reply: Verify Your Email (individual)"));
        assert!(raw.contains("Content-Type: text/html"));
    }

    #[rstest]
    fn invalid_sender_is_rejected_at_setup() {
        let config = SmtpConfig::new("smtp.example.com", "not-an-address", "secret");
        assert!(matches!(
            SmtpVerificationNotifier::new(&config),
            Err(SmtpSetupError::Sender { .. })
        ));
    }

    #[rstest]
    fn config_debug_redacts_password() {
        let config = SmtpConfig::new("smtp.example.com", "noreply@example.com", "hunter2");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert_eq!(config.relay(), "smtp.example.com");
    }
}
