//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, hasher, token issuer, notifier, PIN source)
//! expose strongly typed errors so adapters map their failures into
//! predictable variants. Driving ports return the domain [`Error`].
//!
//! [`Error`]: crate::domain::Error

mod macros;
pub(crate) use macros::define_port_error;

mod food_record_repository;
mod food_records_command;
mod login_service;
mod password_hasher;
mod pin_generator;
mod registration_command;
mod token_issuer;
mod user_repository;
mod verification_command;
mod verification_notifier;

#[cfg(test)]
pub use food_record_repository::MockFoodRecordRepository;
pub use food_record_repository::{FoodRecordPersistenceError, FoodRecordRepository};
#[cfg(test)]
pub use food_records_command::MockFoodRecordsCommand;
pub use food_records_command::FoodRecordsCommand;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{LoginOutcome, LoginService};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use pin_generator::MockPinGenerator;
pub use pin_generator::PinGenerator;
#[cfg(test)]
pub use registration_command::MockRegistrationCommand;
pub use registration_command::{RegistrationCommand, RegistrationOutcome};
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{ACCESS_TOKEN_TTL_SECS, AccessClaims, IssuedToken, TokenError, TokenIssuer};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use verification_command::MockVerificationCommand;
pub use verification_command::VerificationCommand;
#[cfg(test)]
pub use verification_notifier::MockVerificationNotifier;
pub use verification_notifier::{NotificationError, VerificationNotifier};
