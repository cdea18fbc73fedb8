//! `VerificationNotifier` that writes the message to the log instead of
//! sending it. Intended for local development without a mail relay.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{NotificationError, VerificationNotifier};
use crate::domain::{EmailAddress, VerificationMessage};

#[derive(Debug, Default, Clone, Copy)]
pub struct LogOnlyVerificationNotifier;

#[async_trait]
impl VerificationNotifier for LogOnlyVerificationNotifier {
    async fn send(
        &self,
        recipient: &EmailAddress,
        message: &VerificationMessage,
    ) -> Result<(), NotificationError> {
        info!(
            recipient = %recipient,
            subject = %message.subject,
            body = %message.html_body,
            "verification message not sent: log-only mail delivery"
        );
        Ok(())
    }
}
