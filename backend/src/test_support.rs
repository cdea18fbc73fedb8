//! Test utilities for the backend crate.
//!
//! In-memory port adapters shared by unit tests (in `src/`) and integration
//! tests (in `tests/`). Compiled for tests and behind the `test-support`
//! feature.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test, web};
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{
    FoodRecordPersistenceError, FoodRecordRepository, NotificationError, PinGenerator,
    UserPersistenceError, UserRepository, VerificationNotifier,
};
use crate::domain::{
    DisplayName, EmailAddress, FoodDonation, FoodPurchase, FoodRecordsService,
    RegistrationService, SessionService, UserAccount, UserId, UserRole, VerificationMessage,
    VerificationPin, VerificationService, VerificationState,
};
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;
use crate::outbound::security::{BcryptPasswordHasher, JwtTokenIssuer};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clock that only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *lock(&self.0) += TimeDelta::seconds(seconds);
    }
}

impl Default for MutableClock {
    fn default() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 1, 5, 9, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self::new(start)
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *lock(&self.0)
    }
}

/// Credential store held in a vector, enforcing the same uniqueness rules as
/// the database: one account per email and per admin id.
#[derive(Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<Vec<UserAccount>>,
}

impl InMemoryUserRepository {
    /// Snapshot of every stored account in insertion order.
    pub fn accounts(&self) -> Vec<UserAccount> {
        lock(&self.accounts).clone()
    }

    /// Stored account for `email`, if any.
    pub fn account_for(&self, email: &str) -> Option<UserAccount> {
        let email = EmailAddress::new(email).ok()?;
        lock(&self.accounts)
            .iter()
            .find(|account| account.email == email)
            .cloned()
    }
}

fn admin_id_of(account: &UserAccount) -> Option<i64> {
    match &account.role {
        UserRole::Admin { admin_id } => Some(admin_id.get()),
        _ => None,
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut accounts = lock(&self.accounts);
        if accounts.iter().any(|existing| existing.email == user.email) {
            return Err(UserPersistenceError::duplicate_email());
        }
        let admin_id = admin_id_of(user);
        if admin_id.is_some()
            && accounts
                .iter()
                .any(|existing| admin_id_of(existing) == admin_id)
        {
            return Err(UserPersistenceError::duplicate_admin_id());
        }
        accounts.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(lock(&self.accounts)
            .iter()
            .find(|account| account.id == *id)
            .cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(lock(&self.accounts)
            .iter()
            .find(|account| account.email == *email)
            .cloned())
    }

    async fn find_by_display_name(
        &self,
        name: &DisplayName,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(lock(&self.accounts)
            .iter()
            .filter(|account| account.display_name == *name)
            .min_by_key(|account| account.created_at)
            .cloned())
    }

    async fn confirm_verification(
        &self,
        id: &UserId,
        pin: &VerificationPin,
    ) -> Result<bool, UserPersistenceError> {
        let mut accounts = lock(&self.accounts);
        let Some(account) = accounts.iter_mut().find(|account| account.id == *id) else {
            return Ok(false);
        };
        match &account.verification {
            VerificationState::Pending { pin: stored } if stored == pin => {
                account.verification = VerificationState::Verified;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Food record store held in vectors.
#[derive(Default)]
pub struct InMemoryFoodRecordRepository {
    donations: Mutex<Vec<FoodDonation>>,
    purchases: Mutex<Vec<FoodPurchase>>,
}

impl InMemoryFoodRecordRepository {
    pub fn donations(&self) -> Vec<FoodDonation> {
        lock(&self.donations).clone()
    }

    pub fn purchases(&self) -> Vec<FoodPurchase> {
        lock(&self.purchases).clone()
    }
}

#[async_trait]
impl FoodRecordRepository for InMemoryFoodRecordRepository {
    async fn insert_donation(
        &self,
        donation: &FoodDonation,
    ) -> Result<(), FoodRecordPersistenceError> {
        lock(&self.donations).push(donation.clone());
        Ok(())
    }

    async fn insert_purchase(
        &self,
        purchase: &FoodPurchase,
    ) -> Result<(), FoodRecordPersistenceError> {
        lock(&self.purchases).push(purchase.clone());
        Ok(())
    }
}

/// Notifier that keeps every message instead of sending it.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(EmailAddress, VerificationMessage)>>,
    fail: bool,
}

impl RecordingNotifier {
    /// A notifier whose transport always fails.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<(EmailAddress, VerificationMessage)> {
        lock(&self.sent).clone()
    }
}

#[async_trait]
impl VerificationNotifier for RecordingNotifier {
    async fn send(
        &self,
        recipient: &EmailAddress,
        message: &VerificationMessage,
    ) -> Result<(), NotificationError> {
        if self.fail {
            return Err(NotificationError::transport("relay unavailable"));
        }
        lock(&self.sent).push((recipient.clone(), message.clone()));
        Ok(())
    }
}

/// PIN source returning the same code every time.
#[derive(Debug, Clone)]
pub struct FixedPinGenerator(VerificationPin);

impl FixedPinGenerator {
    /// # Panics
    /// Panics when `code` is outside `1000..=9999`.
    pub fn new(code: u16) -> Self {
        match VerificationPin::from_code(code) {
            Ok(pin) => Self(pin),
            Err(error) => panic!("fixed PIN {code} is invalid: {error}"),
        }
    }
}

impl PinGenerator for FixedPinGenerator {
    fn generate(&self) -> VerificationPin {
        self.0.clone()
    }
}

/// Secret shared by the harness token issuer.
pub const TEST_TOKEN_SECRET: &[u8] = b"foodshare-test-secret-0123456789abcdef";

/// PIN mailed by a default [`TestHarness`].
pub const TEST_PIN: u16 = 4821;

/// Fully wired HTTP state backed by in-memory adapters.
pub struct TestHarness {
    pub users: Arc<InMemoryUserRepository>,
    pub records: Arc<InMemoryFoodRecordRepository>,
    pub notifier: Arc<RecordingNotifier>,
    pub clock: Arc<MutableClock>,
    pub tokens: Arc<JwtTokenIssuer>,
    pub state: HttpState,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_notifier(RecordingNotifier::default())
    }

    /// Harness whose verification mail always fails to send.
    pub fn with_failing_notifier() -> Self {
        Self::with_notifier(RecordingNotifier::failing())
    }

    fn with_notifier(notifier: RecordingNotifier) -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let records = Arc::new(InMemoryFoodRecordRepository::default());
        let notifier = Arc::new(notifier);
        let clock = Arc::new(MutableClock::default());
        let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));
        let tokens = match JwtTokenIssuer::new(TEST_TOKEN_SECRET, clock.clone()) {
            Ok(issuer) => Arc::new(issuer),
            Err(error) => panic!("test token issuer: {error}"),
        };

        let state = HttpState::new(
            Arc::new(RegistrationService::new(
                users.clone(),
                hasher.clone(),
                Arc::new(FixedPinGenerator::new(TEST_PIN)),
                notifier.clone(),
                clock.clone(),
            )),
            Arc::new(VerificationService::new(users.clone())),
            Arc::new(SessionService::new(users.clone(), hasher, tokens.clone())),
            Arc::new(FoodRecordsService::new(
                users.clone(),
                records.clone(),
                clock.clone(),
            )),
            tokens.clone(),
        );

        Self {
            users,
            records,
            notifier,
            clock,
            tokens,
            state,
        }
    }
}

impl TestHarness {
    /// POST `body` to `uri` through the full route table and return the
    /// status with the decoded JSON body (`Null` when empty).
    pub async fn post_json(
        &self,
        uri: &str,
        body: serde_json::Value,
        bearer: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(self.state.clone()))
                .configure(configure),
        )
        .await;
        let mut request = test::TestRequest::post().uri(uri).set_json(body);
        if let Some(token) = bearer {
            request = request.insert_header((AUTHORIZATION, format!("Bearer {token}")));
        }
        let response = test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let bytes = test::read_body(response).await;
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, json)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
