//! Verification workflow: consume a pending PIN.
//!
//! PINs never expire and attempts are not counted. The repository write is
//! conditional on the stored PIN, so two concurrent submissions of the same
//! PIN cannot both succeed.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{UserPersistenceError, UserRepository, VerificationCommand};
use crate::domain::{Error, PinSubmission};

fn map_user_error(error: UserPersistenceError) -> Error {
    Error::internal(format!("user repository error: {error}"))
}

fn invalid_pin() -> Error {
    Error::invalid_credentials("Invalid PIN.")
}

/// Verification service implementing [`VerificationCommand`].
#[derive(Clone)]
pub struct VerificationService<U> {
    users: Arc<U>,
}

impl<U> VerificationService<U> {
    /// Create a new verification service.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> VerificationCommand for VerificationService<U>
where
    U: UserRepository,
{
    async fn verify(&self, submission: &PinSubmission) -> Result<(), Error> {
        let account = self
            .users
            .find_by_email(submission.email())
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::invalid_credentials("User does not exist."))?;

        // A verified account has no PIN left to match.
        let pin = account
            .pending_pin()
            .filter(|pin| pin.matches(submission.pin()))
            .ok_or_else(invalid_pin)?;

        let confirmed = self
            .users
            .confirm_verification(&account.id, pin)
            .await
            .map_err(map_user_error)?;
        if !confirmed {
            return Err(invalid_pin());
        }

        info!(user_id = %account.id, "email verified");
        Ok(())
    }
}

#[cfg(test)]
#[path = "verification_service_tests.rs"]
mod tests;
