//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{food_donations, food_purchases, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
    pub user_type: String,
    pub organization_type: Option<String>,
    pub registration_number: Option<String>,
    pub admin_id: Option<i64>,
    pub is_verified: bool,
    pub verification_pin: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub display_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub user_type: &'a str,
    pub organization_type: Option<&'a str>,
    pub registration_number: Option<&'a str>,
    pub admin_id: Option<i64>,
    pub is_verified: bool,
    pub verification_pin: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Food record models
// ---------------------------------------------------------------------------

/// Insertable struct for donation records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = food_donations)]
pub(crate) struct NewFoodDonationRow<'a> {
    pub id: Uuid,
    pub donor_id: Uuid,
    pub recipient_id: Option<Uuid>,
    pub food_type: &'a str,
    pub quantity: i32,
    pub expiration_date: DateTime<Utc>,
    pub location: &'a str,
    pub pickup_time: &'a str,
    pub contact_info: &'a str,
    pub images: &'a [String],
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for purchase records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = food_purchases)]
pub(crate) struct NewFoodPurchaseRow<'a> {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub restaurant: &'a str,
    pub food_type: &'a str,
    pub quantity: i32,
    pub price: f64,
    pub discount: f64,
    pub total_price: f64,
    pub purchase_date: DateTime<Utc>,
}
