//! Bearer token extractor for protected routes.
//!
//! Handlers take an [`AuthenticatedUser`] argument; requests without a valid
//! `Authorization: Bearer <token>` header are rejected with `401` before the
//! handler runs.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::ports::TokenError;
use crate::domain::{Error, UserId, UserType};

use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity asserted by a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    /// Role at token issuance; handlers re-check the stored role.
    pub user_type: UserType,
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("Authorization token is required"))?;
    header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("Authorization header must use the Bearer scheme"))
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let token = bearer_token(req)?;
    let claims = state.tokens.verify(token).map_err(|err| {
        debug!(error = %err, "bearer token rejected");
        match err {
            TokenError::Expired => Error::unauthorized("Token expired"),
            TokenError::Invalid { .. } | TokenError::Signing { .. } => {
                Error::unauthorized("Invalid token")
            }
        }
    })?;
    Ok(AuthenticatedUser {
        user_id: claims.sub,
        user_type: claims.user_type,
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
