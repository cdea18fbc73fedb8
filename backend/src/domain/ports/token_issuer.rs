//! Port for signed, time-limited access tokens.
//!
//! Tokens are stateless: there is no session table and no revocation list,
//! so a token stays valid until its `exp` claim passes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{UserId, UserType};

use super::define_port_error;

/// Lifetime of an issued access token in seconds.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 3600;

define_port_error! {
    /// Errors raised by token issuer adapters.
    pub enum TokenError {
        /// The token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
        /// The token was malformed or its signature did not verify.
        Invalid { message: String } => "token rejected: {message}",
        /// The token's `exp` claim has passed.
        Expired => "token expired",
    }
}

/// Claims asserted by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    /// Account identifier.
    pub sub: UserId,
    /// Account role at issuance.
    pub user_type: UserType,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl AccessClaims {
    /// Claims for a token issued at `now`.
    pub fn issued_at(sub: UserId, user_type: UserType, now: DateTime<Utc>) -> Self {
        let iat = now.timestamp();
        Self {
            sub,
            user_type,
            iat,
            exp: iat + ACCESS_TOKEN_TTL_SECS,
        }
    }
}

/// Encoded token together with the claims it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub claims: AccessClaims,
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Sign a token for the account.
    fn issue(&self, sub: &UserId, user_type: UserType) -> Result<IssuedToken, TokenError>;

    /// Validate a token's signature and expiry and return its claims.
    fn verify(&self, token: &str) -> Result<AccessClaims, TokenError>;
}
