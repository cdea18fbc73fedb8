//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod bearer;
pub mod error;
pub mod food;
pub mod health;
pub mod state;
mod validation;

use actix_web::web;

pub use error::{ApiResult, json_error_handler};

/// Register the account and food routes together with the JSON body
/// configuration they rely on. Handlers expect `web::Data<HttpState>` to be
/// registered on the enclosing app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/auth")
                .service(auth::signup)
                .service(auth::verify)
                .service(auth::login),
        )
        .service(web::scope("/food").service(food::donate).service(food::buy));
}
