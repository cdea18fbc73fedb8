//! Credential adapters: password hashing, access tokens and PIN issuance.

mod bcrypt_password_hasher;
mod jwt_token_issuer;
mod random_pin_generator;

pub use bcrypt_password_hasher::{BcryptPasswordHasher, DEFAULT_BCRYPT_COST};
pub use jwt_token_issuer::{JwtTokenIssuer, TokenSecretError};
pub use random_pin_generator::RandomPinGenerator;
