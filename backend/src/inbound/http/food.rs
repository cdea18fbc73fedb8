//! Food donation and purchase handlers. Both routes require a bearer token.
//!
//! ```text
//! POST /food/donate {"foodType":"bread","quantity":4,"expirationDate":"2026-11-01T12:00:00Z",...}
//! POST /food/buy    {"restaurant":"Luigi's","foodType":"pizza","quantity":2,"price":9.5,"discount":10}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{DonationParts, DonationRequest, DonationStatus, PurchaseParts, PurchaseRequest};

use super::ApiResult;
use super::bearer::AuthenticatedUser;
use super::state::HttpState;
use super::validation::food_validation_error;

/// Request body for `POST /food/donate`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonateRequest {
    pub food_type: Option<String>,
    pub quantity: Option<i64>,
    /// RFC 3339 timestamp.
    #[schema(example = "2026-11-01T12:00:00Z")]
    pub expiration_date: Option<String>,
    pub location: Option<String>,
    pub pickup_time: Option<String>,
    pub contact_info: Option<String>,
    /// Intended recipient account id. Unknown ids are stored as no recipient.
    pub recipient_id: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Request body for `POST /food/buy`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuyRequest {
    #[serde(alias = "resturant")]
    pub restaurant: Option<String>,
    pub food_type: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
    /// Percentage in `0..=100`.
    pub discount: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationResponse {
    pub message: String,
    pub donation_id: Uuid,
    pub status: DonationStatus,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    pub message: String,
    pub purchase_id: Uuid,
    /// `price × quantity × (1 − discount/100)`.
    pub total_price: f64,
}

/// Record a food donation by an individual.
#[utoipa::path(
    post,
    path = "/food/donate",
    request_body = DonateRequest,
    responses(
        (status = 201, description = "Donation recorded", body = DonationResponse),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 401, description = "Missing or invalid token", body = crate::domain::Error),
        (status = 403, description = "Caller is not an individual", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["food"],
    operation_id = "donateFood",
    security(("bearer" = []))
)]
#[post("/donate")]
pub async fn donate(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<DonateRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let request = DonationRequest::try_from_parts(DonationParts {
        food_type: body.food_type.as_deref(),
        quantity: body.quantity,
        expiration_date: body.expiration_date.as_deref(),
        location: body.location.as_deref(),
        pickup_time: body.pickup_time.as_deref(),
        contact_info: body.contact_info.as_deref(),
        recipient_id: body.recipient_id.as_deref(),
        images: body.images,
    })
    .map_err(food_validation_error)?;
    let donation = state.food.donate(&caller.user_id, request).await?;
    Ok(HttpResponse::Created().json(DonationResponse {
        message: "Donation created successfully".to_owned(),
        donation_id: donation.id,
        status: donation.status,
    }))
}

/// Record a discounted food purchase by an individual.
#[utoipa::path(
    post,
    path = "/food/buy",
    request_body = BuyRequest,
    responses(
        (status = 201, description = "Purchase recorded", body = PurchaseResponse),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 401, description = "Missing or invalid token", body = crate::domain::Error),
        (status = 403, description = "Caller is not an individual", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["food"],
    operation_id = "buyFood",
    security(("bearer" = []))
)]
#[post("/buy")]
pub async fn buy(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<BuyRequest>,
) -> ApiResult<HttpResponse> {
    let request = PurchaseRequest::try_from_parts(PurchaseParts {
        restaurant: payload.restaurant.as_deref(),
        food_type: payload.food_type.as_deref(),
        quantity: payload.quantity,
        price: payload.price,
        discount: payload.discount,
    })
    .map_err(food_validation_error)?;
    let purchase = state.food.buy(&caller.user_id, request).await?;
    Ok(HttpResponse::Created().json(PurchaseResponse {
        message: "Food purchased successfully".to_owned(),
        purchase_id: purchase.id,
        total_price: purchase.total_price,
    }))
}

#[cfg(test)]
mod tests;
