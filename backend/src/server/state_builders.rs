//! Builds the HTTP state from production adapters.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::warn;

use foodshare::domain::ports::{PasswordHasher, TokenIssuer, VerificationNotifier};
use foodshare::domain::{FoodRecordsService, RegistrationService, SessionService, VerificationService};
use foodshare::inbound::http::state::HttpState;
use foodshare::outbound::mail::{
    LogOnlyVerificationNotifier, SmtpSetupError, SmtpVerificationNotifier,
};
use foodshare::outbound::persistence::{DieselFoodRecordRepository, DieselUserRepository};
use foodshare::outbound::security::{
    BcryptPasswordHasher, JwtTokenIssuer, RandomPinGenerator, TokenSecretError,
};
use foodshare::settings::MailDelivery;

use super::ServerConfig;

/// Failures while assembling adapters.
#[derive(Debug, thiserror::Error)]
pub enum StateBuildError {
    #[error(transparent)]
    TokenSecret(#[from] TokenSecretError),
    #[error(transparent)]
    Smtp(#[from] SmtpSetupError),
}

fn build_notifier(mail: &MailDelivery) -> Result<Arc<dyn VerificationNotifier>, StateBuildError> {
    match mail {
        MailDelivery::Smtp(config) => Ok(Arc::new(SmtpVerificationNotifier::new(config)?)),
        MailDelivery::LogOnly => {
            warn!("verification mail is logged, not sent");
            Ok(Arc::new(LogOnlyVerificationNotifier))
        }
    }
}

/// Wire every domain service to its Diesel, bcrypt, JWT and mail adapters.
pub fn build_http_state(config: &ServerConfig) -> Result<HttpState, StateBuildError> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let users = Arc::new(DieselUserRepository::new(config.db_pool.clone()));
    let records = Arc::new(DieselFoodRecordRepository::new(config.db_pool.clone()));
    let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptPasswordHasher::default());
    let tokens: Arc<dyn TokenIssuer> =
        Arc::new(JwtTokenIssuer::new(&config.token_secret, clock.clone())?);
    let notifier = build_notifier(&config.mail)?;

    Ok(HttpState::new(
        Arc::new(RegistrationService::new(
            users.clone(),
            hasher.clone(),
            Arc::new(RandomPinGenerator),
            notifier,
            clock.clone(),
        )),
        Arc::new(VerificationService::new(users.clone())),
        Arc::new(SessionService::new(users.clone(), hasher, tokens.clone())),
        Arc::new(FoodRecordsService::new(users, records, clock)),
        tokens,
    ))
}
