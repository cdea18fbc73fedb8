//! Registration workflow.
//!
//! Validated signups become pending accounts: the password is hashed, a
//! one-time PIN is issued and mailed, and the account stays unverified until
//! the PIN comes back through the verification workflow.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{error, info};

use crate::domain::ports::{
    PasswordHasher, PinGenerator, RegistrationCommand, RegistrationOutcome, UserPersistenceError,
    UserRepository, VerificationNotifier,
};
use crate::domain::{
    Error, Registration, UserAccount, UserId, VerificationMessage, VerificationState,
};

const USER_EXISTS: &str = "User already exists";

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateEmail => Error::conflict(USER_EXISTS),
        UserPersistenceError::DuplicateAdminId => Error::conflict("Admin ID already in use")
            .with_details(json!({ "field": "adminId" })),
        UserPersistenceError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Signup service implementing [`RegistrationCommand`].
#[derive(Clone)]
pub struct RegistrationService<U> {
    users: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
    pins: Arc<dyn PinGenerator>,
    notifier: Arc<dyn VerificationNotifier>,
    clock: Arc<dyn Clock>,
}

impl<U> RegistrationService<U> {
    /// Create a new registration service.
    pub fn new(
        users: Arc<U>,
        hasher: Arc<dyn PasswordHasher>,
        pins: Arc<dyn PinGenerator>,
        notifier: Arc<dyn VerificationNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            pins,
            notifier,
            clock,
        }
    }
}

#[async_trait]
impl<U> RegistrationCommand for RegistrationService<U>
where
    U: UserRepository,
{
    async fn register(&self, registration: Registration) -> Result<RegistrationOutcome, Error> {
        let Registration {
            display_name,
            email,
            password,
            role,
        } = registration;

        // Fast path only; the unique index decides races.
        if self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            return Err(Error::conflict(USER_EXISTS));
        }

        let password_hash = self
            .hasher
            .hash(&password)
            .await
            .map_err(|err| Error::internal(err.to_string()))?;
        let pin = self.pins.generate();

        let account = UserAccount {
            id: UserId::random(),
            display_name,
            email,
            password_hash,
            role,
            verification: VerificationState::Pending { pin: pin.clone() },
            created_at: self.clock.utc(),
        };
        self.users
            .insert(&account)
            .await
            .map_err(map_user_error)?;
        info!(
            user_id = %account.id,
            user_type = %account.user_type(),
            "pending account created"
        );

        let message = VerificationMessage::compose(&account.role, &pin);
        if let Err(err) = self.notifier.send(&account.email, &message).await {
            error!(
                user_id = %account.id,
                error = %err,
                "account persisted but verification message was not delivered"
            );
            return Err(Error::internal(err.to_string()));
        }

        Ok(RegistrationOutcome {
            user_id: account.id,
            user_type: account.user_type(),
        })
    }
}

#[cfg(test)]
#[path = "registration_service_tests.rs"]
mod tests;
