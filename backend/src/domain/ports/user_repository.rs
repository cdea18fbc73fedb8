//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{DisplayName, EmailAddress, UserAccount, UserId, VerificationPin};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the email address.
        DuplicateEmail => "an account with this email already exists",
        /// Another admin account already uses the admin identifier.
        DuplicateAdminId => "an admin with this admin id already exists",
    }
}

/// Credential store for user accounts.
///
/// Adapters must enforce email and admin-id uniqueness at write time and
/// report violations as the dedicated duplicate variants.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a newly registered account.
    async fn insert(&self, user: &UserAccount) -> Result<(), UserPersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Fetch an account by normalised email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Fetch the earliest-created account with the given display name.
    async fn find_by_display_name(
        &self,
        name: &DisplayName,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Mark the account verified and clear its PIN, but only while it is
    /// still pending with exactly `pin`. Returns whether a row changed.
    async fn confirm_verification(
        &self,
        id: &UserId,
        pin: &VerificationPin,
    ) -> Result<bool, UserPersistenceError>;
}
