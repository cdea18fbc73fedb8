//! Driving port for creating donation and purchase records.

use async_trait::async_trait;

use crate::domain::{DonationRequest, Error, FoodDonation, FoodPurchase, PurchaseRequest, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FoodRecordsCommand: Send + Sync {
    /// Record a donation from the authenticated caller.
    async fn donate(&self, donor: &UserId, request: DonationRequest)
    -> Result<FoodDonation, Error>;

    /// Record a purchase by the authenticated caller.
    async fn buy(&self, buyer: &UserId, request: PurchaseRequest) -> Result<FoodPurchase, Error>;
}
