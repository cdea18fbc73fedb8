//! Shared classification of Diesel and pool failures.
//!
//! Repositories translate a [`DieselFailure`] into their own port error so
//! that driver details never reach the domain.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Coarse failure classes shared by every repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// A unique constraint rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// The connection dropped mid-operation.
    Connection(&'static str),
    /// Any other query or mapping failure.
    Query(&'static str),
}

/// Classify a Diesel error, logging the driver detail at debug level.
pub(crate) fn classify_diesel_error(error: &DieselError) -> DieselFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
            match kind {
                DatabaseErrorKind::UniqueViolation => DieselFailure::UniqueViolation {
                    constraint: info.constraint_name().map(str::to_owned),
                },
                DatabaseErrorKind::ClosedConnection => {
                    DieselFailure::Connection("database connection error")
                }
                _ => DieselFailure::Query("database error"),
            }
        }
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        other => {
            debug!(error = %other, "diesel operation failed");
            DieselFailure::Query("database error")
        }
    }
}

/// Message carried by a pool failure.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}
