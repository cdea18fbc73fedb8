//! `PasswordHasher` adapter backed by bcrypt.
//!
//! Hashing is CPU-bound, so both operations run on Tokio's blocking pool.
//! The caller's trace id is re-scoped inside the blocking task so log lines
//! emitted there stay correlated with the request.

use async_trait::async_trait;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{Password, PasswordHash, TraceId};

/// Work factor used for stored passwords.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Bcrypt implementation of [`PasswordHasher`].
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl BcryptPasswordHasher {
    /// Hasher with an explicit work factor; tests use the bcrypt minimum.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, String>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let trace_id = TraceId::current();
    let handle = tokio::task::spawn_blocking(move || match trace_id {
        Some(id) => TraceId::sync_scope(id, task),
        None => task(),
    });
    handle.await.map_err(|err| err.to_string())
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        let cost = self.cost;
        let plaintext = password.clone();
        run_blocking(move || bcrypt::hash(plaintext.expose(), cost))
            .await
            .map_err(PasswordHashError::hash)?
            .map(PasswordHash::new)
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    async fn verify(
        &self,
        password: &Password,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let plaintext = password.clone();
        let encoded = hash.as_str().to_owned();
        run_blocking(move || bcrypt::verify(plaintext.expose(), &encoded))
            .await
            .map_err(PasswordHashError::verify)?
            .map_err(|err| PasswordHashError::verify(err.to_string()))
    }
}
