//! Domain primitives, workflows and ports.
//!
//! Purpose: define strongly typed entities used by the API and persistence
//! layers, and the services that implement the driving ports. Keep types
//! immutable and document invariants in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::DomainError`): API error response payload.
//! - ErrorCode: stable error identifier.
//! - UserAccount, UserRole, VerificationState: the credential record.
//! - Registration, LoginCredentials, PinSubmission: validated auth inputs.
//! - DonationRequest, PurchaseRequest: validated food record inputs.
//! - RegistrationService, VerificationService, SessionService,
//!   FoodRecordsService: driving port implementations.

pub mod auth;
pub mod error;
pub mod food;
pub mod food_records_service;
pub mod ports;
pub mod registration_service;
pub mod session_service;
pub mod trace_id;
pub mod user;
pub mod verification_message;
pub mod verification_service;

pub use self::auth::{
    AuthValidationError, LoginCredentials, LoginIdentifier, Password, PinSubmission,
    Registration, SignupParts,
};
pub use self::error::{DomainError as Error, ErrorCode};
pub use self::food::{
    Discount, DonationParts, DonationRequest, DonationStatus, FoodDonation, FoodPurchase,
    FoodValidationError, PurchaseParts, PurchaseRequest, total_price,
};
pub use self::food_records_service::FoodRecordsService;
pub use self::registration_service::RegistrationService;
pub use self::session_service::SessionService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    AdminId, DisplayName, EmailAddress, OrganizationType, PasswordHash, UserAccount, UserId,
    UserRole, UserType, UserValidationError, VerificationPin, VerificationState,
};
pub use self::verification_message::VerificationMessage;
pub use self::verification_service::VerificationService;
