//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FoodRecordsCommand, LoginService, RegistrationCommand, TokenIssuer, VerificationCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn RegistrationCommand>,
    pub verification: Arc<dyn VerificationCommand>,
    pub login: Arc<dyn LoginService>,
    pub food: Arc<dyn FoodRecordsCommand>,
    /// Verifies bearer tokens on protected routes.
    pub tokens: Arc<dyn TokenIssuer>,
}

impl HttpState {
    pub fn new(
        registration: Arc<dyn RegistrationCommand>,
        verification: Arc<dyn VerificationCommand>,
        login: Arc<dyn LoginService>,
        food: Arc<dyn FoodRecordsCommand>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            registration,
            verification,
            login,
            food,
            tokens,
        }
    }
}
