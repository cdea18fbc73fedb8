//! Port for one-time verification PIN generation.

use crate::domain::VerificationPin;

#[cfg_attr(test, mockall::automock)]
pub trait PinGenerator: Send + Sync {
    /// Produce a fresh PIN in `1000..=9999`.
    fn generate(&self) -> VerificationPin;
}
