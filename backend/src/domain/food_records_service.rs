//! Food records workflow: donations and purchases by individuals.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    FoodRecordPersistenceError, FoodRecordRepository, FoodRecordsCommand, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    DonationRequest, DonationStatus, Error, FoodDonation, FoodPurchase, PurchaseRequest,
    UserAccount, UserId, UserType,
};

fn map_user_error(error: UserPersistenceError) -> Error {
    Error::internal(format!("user repository error: {error}"))
}

fn map_record_error(error: FoodRecordPersistenceError) -> Error {
    Error::internal(format!("food record repository error: {error}"))
}

/// Service implementing [`FoodRecordsCommand`].
#[derive(Clone)]
pub struct FoodRecordsService<U, F> {
    users: Arc<U>,
    records: Arc<F>,
    clock: Arc<dyn Clock>,
}

impl<U, F> FoodRecordsService<U, F> {
    /// Create a new food records service.
    pub fn new(users: Arc<U>, records: Arc<F>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            records,
            clock,
        }
    }
}

impl<U, F> FoodRecordsService<U, F>
where
    U: UserRepository,
{
    /// Load the caller and require the individual role.
    async fn individual_caller(
        &self,
        id: &UserId,
        forbidden: &'static str,
    ) -> Result<UserAccount, Error> {
        let caller = self
            .users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized("User does not exist"))?;
        if caller.user_type() != UserType::Individual {
            return Err(Error::forbidden(forbidden));
        }
        Ok(caller)
    }
}

#[async_trait]
impl<U, F> FoodRecordsCommand for FoodRecordsService<U, F>
where
    U: UserRepository,
    F: FoodRecordRepository,
{
    async fn donate(
        &self,
        donor: &UserId,
        request: DonationRequest,
    ) -> Result<FoodDonation, Error> {
        let donor = self
            .individual_caller(donor, "Only individuals can donate food")
            .await?;

        // An unknown recipient is recorded as no recipient.
        let recipient = self
            .users
            .find_by_id(&request.recipient_id)
            .await
            .map_err(map_user_error)?
            .map(|account| account.id);

        let now = self.clock.utc();
        let donation = FoodDonation {
            id: Uuid::new_v4(),
            donor: donor.id,
            recipient,
            food_type: request.food_type,
            quantity: request.quantity,
            expiration_date: request.expiration_date,
            location: request.location,
            pickup_time: request.pickup_time,
            contact_info: request.contact_info,
            images: request.images,
            status: DonationStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.records
            .insert_donation(&donation)
            .await
            .map_err(map_record_error)?;
        info!(donation_id = %donation.id, donor = %donation.donor, "donation recorded");
        Ok(donation)
    }

    async fn buy(&self, buyer: &UserId, request: PurchaseRequest) -> Result<FoodPurchase, Error> {
        let buyer = self
            .individual_caller(buyer, "Only individuals can buy food")
            .await?;

        let total_price = request.total_price();
        let purchase = FoodPurchase {
            id: Uuid::new_v4(),
            buyer: buyer.id,
            restaurant: request.restaurant,
            food_type: request.food_type,
            quantity: request.quantity,
            price: request.price,
            discount: request.discount,
            total_price,
            purchase_date: self.clock.utc(),
        };
        self.records
            .insert_purchase(&purchase)
            .await
            .map_err(map_record_error)?;
        info!(purchase_id = %purchase.id, buyer = %purchase.buyer, total_price, "purchase recorded");
        Ok(purchase)
    }
}

#[cfg(test)]
#[path = "food_records_service_tests.rs"]
mod tests;
