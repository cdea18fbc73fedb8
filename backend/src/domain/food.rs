//! Food donation and purchase records.
//!
//! Requests are validated here; the service attaches the caller identity and
//! server-side timestamps before the records reach a repository.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserId;

/// Validation errors for donation and purchase requests.
#[derive(Debug, Clone, PartialEq)]
pub enum FoodValidationError {
    MissingFields,
    InvalidQuantity,
    InvalidExpirationDate,
    InvalidRecipientId,
    InvalidPrice,
    InvalidDiscount { value: f64 },
}

impl fmt::Display for FoodValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => write!(f, "Missing required fields"),
            Self::InvalidQuantity => {
                write!(f, "quantity must be between 1 and {MAX_QUANTITY}")
            }
            Self::InvalidExpirationDate => {
                write!(f, "expirationDate must be an RFC 3339 timestamp")
            }
            Self::InvalidRecipientId => write!(f, "recipientId must be a valid user id"),
            Self::InvalidPrice => {
                write!(f, "price must be a positive number with a finite total")
            }
            Self::InvalidDiscount { value } => {
                write!(f, "discount must be between 0 and 100, got {value}")
            }
        }
    }
}

impl std::error::Error for FoodValidationError {}

impl FoodValidationError {
    /// Name of the offending request field, when one applies.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingFields => None,
            Self::InvalidQuantity => Some("quantity"),
            Self::InvalidExpirationDate => Some("expirationDate"),
            Self::InvalidRecipientId => Some("recipientId"),
            Self::InvalidPrice => Some("price"),
            Self::InvalidDiscount { .. } => Some("discount"),
        }
    }
}

/// Review state of a donation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl DonationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for DonationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown donation status `{other}`")),
        }
    }
}

fn required(value: Option<&str>) -> Result<&str, FoodValidationError> {
    value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or(FoodValidationError::MissingFields)
}

/// Largest quantity the record store can hold.
pub const MAX_QUANTITY: i64 = i32::MAX as i64;

fn quantity(value: Option<i64>) -> Result<u32, FoodValidationError> {
    let raw = value.ok_or(FoodValidationError::MissingFields)?;
    if !(1..=MAX_QUANTITY).contains(&raw) {
        return Err(FoodValidationError::InvalidQuantity);
    }
    u32::try_from(raw).map_err(|_| FoodValidationError::InvalidQuantity)
}

/// Raw donation fields as received from an inbound adapter.
#[derive(Debug, Default, Clone)]
pub struct DonationParts<'a> {
    pub food_type: Option<&'a str>,
    pub quantity: Option<i64>,
    pub expiration_date: Option<&'a str>,
    pub location: Option<&'a str>,
    pub pickup_time: Option<&'a str>,
    pub contact_info: Option<&'a str>,
    pub recipient_id: Option<&'a str>,
    pub images: Vec<String>,
}

/// Validated donation request; the donor is supplied by the caller's token.
#[derive(Debug, Clone, PartialEq)]
pub struct DonationRequest {
    pub food_type: String,
    pub quantity: u32,
    pub expiration_date: DateTime<Utc>,
    pub location: String,
    pub pickup_time: String,
    pub contact_info: String,
    pub recipient_id: UserId,
    pub images: Vec<String>,
}

impl DonationRequest {
    /// Validate raw donation fields. Presence is checked for every field
    /// before any shape check runs.
    pub fn try_from_parts(parts: DonationParts<'_>) -> Result<Self, FoodValidationError> {
        let food_type = required(parts.food_type)?;
        let expiration_date = required(parts.expiration_date)?;
        let location = required(parts.location)?;
        let pickup_time = required(parts.pickup_time)?;
        let contact_info = required(parts.contact_info)?;
        let recipient_id = required(parts.recipient_id)?;
        let quantity = quantity(parts.quantity)?;

        let expiration_date = DateTime::parse_from_rfc3339(expiration_date)
            .map_err(|_| FoodValidationError::InvalidExpirationDate)?
            .with_timezone(&Utc);
        let recipient_id = recipient_id
            .parse::<UserId>()
            .map_err(|_| FoodValidationError::InvalidRecipientId)?;

        Ok(Self {
            food_type: food_type.to_owned(),
            quantity,
            expiration_date,
            location: location.to_owned(),
            pickup_time: pickup_time.to_owned(),
            contact_info: contact_info.to_owned(),
            recipient_id,
            images: parts.images,
        })
    }
}

/// Persisted donation.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodDonation {
    pub id: Uuid,
    pub donor: UserId,
    /// `None` when the requested recipient does not exist.
    pub recipient: Option<UserId>,
    pub food_type: String,
    pub quantity: u32,
    pub expiration_date: DateTime<Utc>,
    pub location: String,
    pub pickup_time: String,
    pub contact_info: String,
    pub images: Vec<String>,
    pub status: DonationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Percentage discount in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Discount(f64);

impl Discount {
    pub fn new(value: f64) -> Result<Self, FoodValidationError> {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(FoodValidationError::InvalidDiscount { value });
        }
        Ok(Self(value))
    }

    pub fn percent(self) -> f64 {
        self.0
    }
}

/// Raw purchase fields as received from an inbound adapter.
#[derive(Debug, Default, Clone)]
pub struct PurchaseParts<'a> {
    pub restaurant: Option<&'a str>,
    pub food_type: Option<&'a str>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
    pub discount: Option<f64>,
}

/// Validated purchase request; the buyer is supplied by the caller's token.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseRequest {
    pub restaurant: String,
    pub food_type: String,
    pub quantity: u32,
    pub price: f64,
    pub discount: Discount,
}

impl PurchaseRequest {
    /// Validate raw purchase fields. A discount of zero is a valid value,
    /// not a missing one.
    pub fn try_from_parts(parts: PurchaseParts<'_>) -> Result<Self, FoodValidationError> {
        let restaurant = required(parts.restaurant)?;
        let food_type = required(parts.food_type)?;
        let (Some(price), Some(discount)) = (parts.price, parts.discount) else {
            return Err(FoodValidationError::MissingFields);
        };
        let quantity = quantity(parts.quantity)?;

        if !price.is_finite() || price <= 0.0 {
            return Err(FoodValidationError::InvalidPrice);
        }
        let discount = Discount::new(discount)?;
        if !total_price(price, quantity, discount).is_finite() {
            return Err(FoodValidationError::InvalidPrice);
        }

        Ok(Self {
            restaurant: restaurant.to_owned(),
            food_type: food_type.to_owned(),
            quantity,
            price,
            discount,
        })
    }

    /// Amount charged after the discount is applied.
    pub fn total_price(&self) -> f64 {
        total_price(self.price, self.quantity, self.discount)
    }
}

/// `price × quantity × (1 − discount / 100)`.
///
/// # Examples
/// ```
/// use foodshare::domain::{Discount, total_price};
///
/// let total = total_price(10.0, 3, Discount::new(50.0).unwrap());
/// assert!((total - 15.0).abs() < f64::EPSILON);
/// ```
pub fn total_price(price: f64, quantity: u32, discount: Discount) -> f64 {
    price * f64::from(quantity) * (1.0 - discount.percent() / 100.0)
}

/// Persisted purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodPurchase {
    pub id: Uuid,
    pub buyer: UserId,
    pub restaurant: String,
    pub food_type: String,
    pub quantity: u32,
    pub price: f64,
    pub discount: Discount,
    pub total_price: f64,
    pub purchase_date: DateTime<Utc>,
}
