//! Account API handlers.
//!
//! ```text
//! POST /auth/signup {"name":"Ada","email":"ada@example.com","password":"pw","userType":"individual"}
//! POST /auth/verify {"email":"ada@example.com","pin":"4821"}
//! POST /auth/login  {"email":"ada@example.com","password":"pw"}
//! ```
//!
//! Every request field is optional at the serde layer so that missing fields
//! surface as the domain's validation messages rather than generic body
//! errors.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{
    Error, LoginCredentials, PinSubmission, Registration, SignupParts, UserType,
};

use super::ApiResult;
use super::state::HttpState;
use super::validation::auth_validation_error;

/// Request body for `POST /auth/signup`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[schema(example = "Ada")]
    pub name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    pub password: Option<String>,
    /// `individual`, `organization` or `admin`.
    #[schema(example = "individual")]
    pub user_type: Option<String>,
    /// Required for organizations.
    pub registration_number: Option<String>,
    /// `donor` or `recipient`; required for organizations.
    pub organization_type: Option<String>,
    /// Required for admins.
    pub admin_id: Option<i64>,
}

impl SignupRequest {
    fn parts(&self) -> SignupParts<'_> {
        SignupParts {
            name: self.name.as_deref(),
            email: self.email.as_deref(),
            password: self.password.as_deref(),
            user_type: self.user_type.as_deref(),
            registration_number: self.registration_number.as_deref(),
            organization_type: self.organization_type.as_deref(),
            admin_id: self.admin_id,
        }
    }
}

/// Request body for `POST /auth/verify`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub email: Option<String>,
    /// The PIN exactly as mailed. Non-string values never match.
    #[schema(value_type = Option<String>, example = "4821")]
    pub pin: Option<Value>,
}

/// Request body for `POST /auth/login`. Email wins when both identifiers are
/// present.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Plain acknowledgement body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Successful login body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    /// HS256 access token valid for one hour.
    pub token: String,
    pub user_type: UserType,
}

/// Register an account and mail its verification PIN.
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created; PIN mailed", body = MessageResponse),
        (status = 400, description = "Invalid request or duplicate account", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let registration =
        Registration::try_from_parts(payload.parts()).map_err(auth_validation_error)?;
    let outcome = state.registration.register(registration).await?;
    Ok(HttpResponse::Created().json(MessageResponse::new(format!(
        "{} created successfully. Check your email for verification.",
        outcome.user_type
    ))))
}

/// Confirm an email address with the mailed PIN.
#[utoipa::path(
    post,
    path = "/auth/verify",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Email verified", body = MessageResponse),
        (status = 400, description = "Unknown user or wrong PIN", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "verifyEmail",
    security([])
)]
#[post("/verify")]
pub async fn verify(
    state: web::Data<HttpState>,
    payload: web::Json<VerifyRequest>,
) -> ApiResult<HttpResponse> {
    let VerifyRequest { email, pin } = payload.into_inner();
    let pin = match pin {
        None | Some(Value::Null) => None,
        Some(Value::String(pin)) => Some(pin),
        Some(_) => return Err(Error::invalid_credentials("Invalid PIN.")),
    };
    let submission = PinSubmission::try_from_parts(email.as_deref(), pin.as_deref())
        .map_err(auth_validation_error)?;
    state.verification.verify(&submission).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Email verified successfully.")))
}

/// Exchange verified credentials for an access token.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request or credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = LoginCredentials::try_from_parts(
        payload.email.as_deref(),
        payload.name.as_deref(),
        payload.password.as_deref(),
    )
    .map_err(auth_validation_error)?;
    let outcome = state.login.login(&credentials).await?;
    Ok(web::Json(LoginResponse {
        message: "Login successful.".to_owned(),
        token: outcome.token,
        user_type: outcome.user_type,
    }))
}
