//! Driving port for account signup.

use async_trait::async_trait;

use crate::domain::{Error, Registration, UserId, UserType};

/// Result of a successful signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    pub user_id: UserId,
    pub user_type: UserType,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Create a pending account and dispatch its verification PIN.
    async fn register(&self, registration: Registration) -> Result<RegistrationOutcome, Error>;
}
