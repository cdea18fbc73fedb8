//! Port for one-way password hashing.

use async_trait::async_trait;

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Deriving a hash failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be compared against.
        Verify { message: String } => "password verification failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Derive a storable hash from a plaintext password.
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError>;

    /// Compare a plaintext password with a stored hash.
    async fn verify(
        &self,
        password: &Password,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError>;
}
