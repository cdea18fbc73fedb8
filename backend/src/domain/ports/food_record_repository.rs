//! Port for food donation and purchase persistence.

use async_trait::async_trait;

use crate::domain::{FoodDonation, FoodPurchase};

use super::define_port_error;

define_port_error! {
    /// Errors raised by food record repository adapters.
    pub enum FoodRecordPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "food record repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "food record repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FoodRecordRepository: Send + Sync {
    /// Persist a donation.
    async fn insert_donation(&self, donation: &FoodDonation)
    -> Result<(), FoodRecordPersistenceError>;

    /// Persist a purchase.
    async fn insert_purchase(&self, purchase: &FoodPurchase)
    -> Result<(), FoodRecordPersistenceError>;
}
