//! Driving port for email verification.

use async_trait::async_trait;

use crate::domain::{Error, PinSubmission};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VerificationCommand: Send + Sync {
    /// Consume the pending PIN for the submitted email.
    async fn verify(&self, submission: &PinSubmission) -> Result<(), Error>;
}
