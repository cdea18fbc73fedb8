//! PostgreSQL-backed `FoodRecordRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FoodRecordPersistenceError, FoodRecordRepository};
use crate::domain::{FoodDonation, FoodPurchase};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewFoodDonationRow, NewFoodPurchaseRow};
use super::pool::{DbPool, PoolError};
use super::schema::{food_donations, food_purchases};

/// Diesel-backed implementation of the food record repository port.
#[derive(Clone)]
pub struct DieselFoodRecordRepository {
    pool: DbPool,
}

impl DieselFoodRecordRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FoodRecordPersistenceError {
    FoodRecordPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> FoodRecordPersistenceError {
    match classify_diesel_error(&error) {
        DieselFailure::UniqueViolation { .. } => {
            FoodRecordPersistenceError::query("record id already exists")
        }
        DieselFailure::Connection(message) => FoodRecordPersistenceError::connection(message),
        DieselFailure::Query(message) => FoodRecordPersistenceError::query(message),
    }
}

fn quantity_column(quantity: u32) -> Result<i32, FoodRecordPersistenceError> {
    i32::try_from(quantity)
        .map_err(|_| FoodRecordPersistenceError::query("quantity exceeds storable range"))
}

#[async_trait]
impl FoodRecordRepository for DieselFoodRecordRepository {
    async fn insert_donation(
        &self,
        donation: &FoodDonation,
    ) -> Result<(), FoodRecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewFoodDonationRow {
            id: donation.id,
            donor_id: *donation.donor.as_uuid(),
            recipient_id: donation.recipient.map(|id| *id.as_uuid()),
            food_type: donation.food_type.as_str(),
            quantity: quantity_column(donation.quantity)?,
            expiration_date: donation.expiration_date,
            location: donation.location.as_str(),
            pickup_time: donation.pickup_time.as_str(),
            contact_info: donation.contact_info.as_str(),
            images: donation.images.as_slice(),
            status: donation.status.as_str(),
            created_at: donation.created_at,
            updated_at: donation.updated_at,
        };

        diesel::insert_into(food_donations::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn insert_purchase(
        &self,
        purchase: &FoodPurchase,
    ) -> Result<(), FoodRecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewFoodPurchaseRow {
            id: purchase.id,
            buyer_id: *purchase.buyer.as_uuid(),
            restaurant: purchase.restaurant.as_str(),
            food_type: purchase.food_type.as_str(),
            quantity: quantity_column(purchase.quantity)?,
            price: purchase.price,
            discount: purchase.discount.percent(),
            total_price: purchase.total_price,
            purchase_date: purchase.purchase_date,
        };

        diesel::insert_into(food_purchases::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, Some(1))]
    #[case(u32::MAX, None)]
    fn quantity_is_range_checked(#[case] quantity: u32, #[case] expected: Option<i32>) {
        assert_eq!(quantity_column(quantity).ok(), expected);
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        let err = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("closed".to_string()),
        ));
        assert!(matches!(err, FoodRecordPersistenceError::Connection { .. }));
    }
}
