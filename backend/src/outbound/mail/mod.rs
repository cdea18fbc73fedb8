//! Verification message delivery adapters.

mod log_only_verification_notifier;
mod smtp_verification_notifier;

pub use log_only_verification_notifier::LogOnlyVerificationNotifier;
pub use smtp_verification_notifier::{SmtpConfig, SmtpSetupError, SmtpVerificationNotifier};
