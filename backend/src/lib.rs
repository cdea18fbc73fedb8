//! Food donation and marketplace backend.
//!
//! Accounts register with an emailed PIN, verify it, and log in for a bearer
//! token; verified individuals record food donations and purchases.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
