//! Port for delivering verification messages.

use async_trait::async_trait;

use crate::domain::{EmailAddress, VerificationMessage};

use super::define_port_error;

define_port_error! {
    /// Errors raised by notifier adapters.
    pub enum NotificationError {
        /// The message could not be assembled.
        Build { message: String } => "verification message could not be built: {message}",
        /// The transport refused or failed to deliver the message.
        Transport { message: String } => "verification message delivery failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VerificationNotifier: Send + Sync {
    /// Deliver `message` to `recipient`. No retries are attempted.
    async fn send(
        &self,
        recipient: &EmailAddress,
        message: &VerificationMessage,
    ) -> Result<(), NotificationError>;
}
