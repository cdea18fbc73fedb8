//! Translation of domain validation failures into HTTP error payloads.
//!
//! Messages come from the domain `Display` impls; details name the offending
//! camelCase request field and a stable snake_case code.

use serde_json::{Value, json};

use crate::domain::{AuthValidationError, Error, FoodValidationError, UserValidationError};

fn details(field: Option<&str>, code: &str) -> Value {
    match field {
        Some(field) => json!({ "field": field, "code": code }),
        None => json!({ "code": code }),
    }
}

fn user_field_and_code(err: &UserValidationError) -> (&'static str, &'static str) {
    match err {
        UserValidationError::EmptyDisplayName => ("name", "empty_name"),
        UserValidationError::DisplayNameTooLong { .. } => ("name", "name_too_long"),
        UserValidationError::EmptyEmail => ("email", "empty_email"),
        UserValidationError::InvalidEmail => ("email", "invalid_email"),
        UserValidationError::InvalidUserType => ("userType", "invalid_user_type"),
        UserValidationError::InvalidOrganizationType => {
            ("organizationType", "invalid_organization_type")
        }
        UserValidationError::MissingRegistrationNumber => {
            ("registrationNumber", "missing_registration_number")
        }
        UserValidationError::MissingAdminId => ("adminId", "missing_admin_id"),
        UserValidationError::InvalidAdminId => ("adminId", "invalid_admin_id"),
        UserValidationError::InvalidPin => ("pin", "invalid_pin"),
    }
}

/// Map an authentication request validation failure to a 400 error.
pub(crate) fn auth_validation_error(err: AuthValidationError) -> Error {
    let details = match &err {
        AuthValidationError::MissingSignupFields => details(None, "missing_fields"),
        AuthValidationError::MissingIdentifier => details(Some("email"), "missing_identifier"),
        AuthValidationError::MissingPassword => details(Some("password"), "missing_password"),
        AuthValidationError::MissingVerificationFields => details(None, "missing_fields"),
        AuthValidationError::User(inner) => {
            let (field, code) = user_field_and_code(inner);
            details(Some(field), code)
        }
    };
    Error::invalid_request(err.to_string()).with_details(details)
}

/// Map a food record validation failure to a 400 error.
pub(crate) fn food_validation_error(err: FoodValidationError) -> Error {
    let code = match &err {
        FoodValidationError::MissingFields => "missing_fields",
        FoodValidationError::InvalidQuantity => "invalid_quantity",
        FoodValidationError::InvalidExpirationDate => "invalid_timestamp",
        FoodValidationError::InvalidRecipientId => "invalid_uuid",
        FoodValidationError::InvalidPrice => "invalid_price",
        FoodValidationError::InvalidDiscount { .. } => "invalid_discount",
    };
    Error::invalid_request(err.to_string()).with_details(details(err.field(), code))
}
