//! `PinGenerator` adapter drawing from the thread-local RNG.

use crate::domain::VerificationPin;
use crate::domain::ports::PinGenerator;

/// Uniform PIN source backed by `rand::thread_rng`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPinGenerator;

impl PinGenerator for RandomPinGenerator {
    fn generate(&self) -> VerificationPin {
        VerificationPin::random(&mut rand::thread_rng())
    }
}
