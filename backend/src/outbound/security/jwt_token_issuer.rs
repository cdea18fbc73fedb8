//! `TokenIssuer` adapter producing HS256 JSON Web Tokens.
//!
//! Expiry is checked against the injected clock rather than the system time,
//! so token lifetime is deterministic under test.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;

use crate::domain::ports::{AccessClaims, IssuedToken, TokenError, TokenIssuer};
use crate::domain::{UserId, UserType};

/// Errors raised when constructing an issuer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenSecretError {
    #[error("token secret must not be empty")]
    Empty,
}

/// HS256 implementation of [`TokenIssuer`].
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl JwtTokenIssuer {
    /// Build an issuer from a shared secret.
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Result<Self, TokenSecretError> {
        if secret.is_empty() {
            return Err(TokenSecretError::Empty);
        }
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            clock,
        })
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, sub: &UserId, user_type: UserType) -> Result<IssuedToken, TokenError> {
        let claims = AccessClaims::issued_at(*sub, user_type, self.clock.utc());
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::signing(err.to_string()))?;
        Ok(IssuedToken { token, claims })
    }

    fn verify(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let data = decode::<AccessClaims>(token, &self.decoding, &self.validation)
            .map_err(|err| TokenError::invalid(err.to_string()))?;
        if data.claims.exp <= self.clock.utc().timestamp() {
            return Err(TokenError::expired());
        }
        Ok(data.claims)
    }
}
