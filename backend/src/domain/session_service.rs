//! Session workflow: check credentials and issue an access token.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    LoginOutcome, LoginService, PasswordHasher, TokenIssuer, UserPersistenceError,
    UserRepository,
};
use crate::domain::{Error, LoginCredentials, LoginIdentifier};

fn map_user_error(error: UserPersistenceError) -> Error {
    Error::internal(format!("user repository error: {error}"))
}

/// Login service implementing [`LoginService`].
#[derive(Clone)]
pub struct SessionService<U> {
    users: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl<U> SessionService<U> {
    /// Create a new session service.
    pub fn new(
        users: Arc<U>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl<U> LoginService for SessionService<U>
where
    U: UserRepository,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error> {
        let lookup = match credentials.identifier() {
            LoginIdentifier::Email(email) => self.users.find_by_email(email).await,
            LoginIdentifier::DisplayName(name) => self.users.find_by_display_name(name).await,
        };
        let account = lookup
            .map_err(map_user_error)?
            .ok_or_else(|| Error::invalid_credentials("User does not exist."))?;

        if !account.is_verified() {
            return Err(Error::invalid_credentials("Email not verified."));
        }

        let matches = self
            .hasher
            .verify(credentials.password(), &account.password_hash)
            .await
            .map_err(|err| Error::internal(err.to_string()))?;
        if !matches {
            return Err(Error::invalid_credentials("Invalid credentials."));
        }

        let issued = self
            .tokens
            .issue(&account.id, account.user_type())
            .map_err(|err| Error::internal(err.to_string()))?;
        info!(user_id = %account.id, "login succeeded");

        Ok(LoginOutcome {
            user_id: account.id,
            user_type: account.user_type(),
            token: issued.token,
        })
    }
}

#[cfg(test)]
#[path = "session_service_tests.rs"]
mod tests;
