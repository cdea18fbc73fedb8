//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses; every workflow failure is expressed as a [`DomainError`] with a
//! stable [`ErrorCode`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The request collides with an existing record (duplicate email or admin id).
    Conflict,
    /// A workflow rejected the supplied credentials, PIN, or account state.
    InvalidCredentials,
    /// A bearer token was missing, malformed, or expired.
    Unauthorized,
    /// Authenticated but the account role may not perform this action.
    Forbidden,
    /// A dependency (store, mail transport, signer) failed.
    InternalError,
}

/// Domain error payload.
///
/// The trace identifier of the request in scope is captured on construction
/// so error bodies can be correlated with logs.
///
/// # Examples
/// ```
/// use foodshare::domain::{Error, ErrorCode};
///
/// let err = Error::conflict("User already exists");
/// assert_eq!(err.code(), ErrorCode::Conflict);
/// assert_eq!(err.message(), "User already exists");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = Error)]
pub struct DomainError {
    #[schema(example = "invalid_request")]
    code: ErrorCode,
    #[schema(example = "Invalid PIN")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "01HZY8B2-W6X5-Y7Z9-ABCD-123400000000")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl DomainError {
    /// Create a new error, capturing the trace identifier if one is in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier captured when the error was created.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace identifier to the error.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use foodshare::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "email" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidCredentials`].
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidCredentials, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

    #[rstest]
    #[case(DomainError::invalid_request("bad"), ErrorCode::InvalidRequest)]
    #[case(DomainError::conflict("dup"), ErrorCode::Conflict)]
    #[case(DomainError::invalid_credentials("nope"), ErrorCode::InvalidCredentials)]
    #[case(DomainError::unauthorized("token"), ErrorCode::Unauthorized)]
    #[case(DomainError::forbidden("role"), ErrorCode::Forbidden)]
    #[case(DomainError::internal("boom"), ErrorCode::InternalError)]
    fn constructors_set_codes(#[case] error: DomainError, #[case] expected: ErrorCode) {
        assert_eq!(error.code(), expected);
    }

    #[rstest]
    fn new_returns_none_when_trace_id_out_of_scope() {
        let error = DomainError::internal("boom");
        assert!(error.trace_id().is_none());
    }

    #[tokio::test]
    async fn new_captures_trace_id_in_scope() {
        let trace_id: TraceId = TRACE_ID.parse().expect("valid UUID");
        let error = TraceId::scope(trace_id, async { DomainError::conflict("dup") }).await;
        assert_eq!(error.trace_id(), Some(TRACE_ID));
    }

    #[rstest]
    fn serialises_camel_case_and_skips_empty_fields() {
        let error = DomainError::invalid_request("bad");
        let value = serde_json::to_value(&error).expect("serialise error");
        assert_eq!(value, json!({ "code": "invalid_request", "message": "bad" }));

        let detailed = error
            .with_trace_id("abc")
            .with_details(json!({ "field": "email" }));
        let value = serde_json::to_value(&detailed).expect("serialise error");
        assert_eq!(value.get("traceId"), Some(&json!("abc")));
        assert_eq!(value.get("details"), Some(&json!({ "field": "email" })));
    }
}
