//! User account model.
//!
//! Role-conditional fields and the verification lifecycle are encoded as sum
//! types so that an account can only be built in one of its legal shapes:
//! organizations always carry a registration number and sub-type, admins
//! always carry an admin id, and a PIN exists exactly while the account is
//! unverified.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors raised by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyDisplayName,
    DisplayNameTooLong { max: usize },
    EmptyEmail,
    InvalidEmail,
    InvalidUserType,
    InvalidOrganizationType,
    MissingRegistrationNumber,
    MissingAdminId,
    InvalidAdminId,
    InvalidPin,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDisplayName => write!(f, "name must not be empty"),
            Self::DisplayNameTooLong { max } => {
                write!(f, "name must be at most {max} characters")
            }
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::InvalidUserType => write!(f, "Invalid user type"),
            Self::InvalidOrganizationType => write!(
                f,
                "Invalid organization type. Must be 'donor' or 'recipient'."
            ),
            Self::MissingRegistrationNumber => {
                write!(f, "Registration number is required for organizations.")
            }
            Self::MissingAdminId => write!(f, "Admin ID is required for admins."),
            Self::InvalidAdminId => write!(f, "Admin ID must be a positive integer."),
            Self::InvalidPin => write!(f, "verification PIN must be a 4-digit code"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already-parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 64;

/// Human readable display name, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    pub fn new(display_name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = display_name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if trimmed.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maximum length of an email address (RFC 5321 path limit).
pub const EMAIL_MAX: usize = 254;

/// Normalised email address.
///
/// ## Invariants
/// - Stored trimmed and lowercased; lookups and the uniqueness constraint are
///   therefore case-insensitive.
/// - Contains exactly one `@` with a non-empty local part and a dotted domain.
///
/// # Examples
/// ```
/// use foodshare::domain::EmailAddress;
///
/// let email = EmailAddress::new("  Ada@Example.COM ").unwrap();
/// assert_eq!(email.as_ref(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate an email address.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = email.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if normalised.len() > EMAIL_MAX || normalised.chars().any(char::is_whitespace) {
            return Err(UserValidationError::InvalidEmail);
        }

        let mut parts = normalised.split('@');
        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(UserValidationError::InvalidEmail);
        };
        let domain_ok = domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !domain.contains("..");
        if local.is_empty() || !domain_ok {
            return Err(UserValidationError::InvalidEmail);
        }

        Ok(Self(normalised))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed classification of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Individual,
    Organization,
    Admin,
}

impl UserType {
    /// Wire and storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Organization => "organization",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for UserType {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(Self::Individual),
            "organization" => Ok(Self::Organization),
            "admin" => Ok(Self::Admin),
            _ => Err(UserValidationError::InvalidUserType),
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Organization sub-type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrganizationType {
    Donor,
    Recipient,
}

impl OrganizationType {
    /// Wire and storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Donor => "donor",
            Self::Recipient => "recipient",
        }
    }
}

impl FromStr for OrganizationType {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "donor" => Ok(Self::Donor),
            "recipient" => Ok(Self::Recipient),
            _ => Err(UserValidationError::InvalidOrganizationType),
        }
    }
}

/// Globally unique identifier carried by admin accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdminId(i64);

impl AdminId {
    /// Validate that the identifier is strictly positive.
    pub fn new(value: i64) -> Result<Self, UserValidationError> {
        if value <= 0 {
            return Err(UserValidationError::InvalidAdminId);
        }
        Ok(Self(value))
    }

    /// Raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

/// Account role together with the fields that role requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRole {
    Individual,
    Organization {
        registration_number: String,
        organization_type: OrganizationType,
    },
    Admin {
        admin_id: AdminId,
    },
}

impl UserRole {
    /// Assemble a role from loosely typed inputs.
    ///
    /// Fields that the chosen role does not use are ignored, so an individual
    /// signing up with a stray `registrationNumber` is still an individual.
    pub fn from_parts(
        user_type: UserType,
        organization_type: Option<&str>,
        registration_number: Option<&str>,
        admin_id: Option<i64>,
    ) -> Result<Self, UserValidationError> {
        match user_type {
            UserType::Individual => Ok(Self::Individual),
            UserType::Organization => {
                let organization_type = organization_type
                    .ok_or(UserValidationError::InvalidOrganizationType)?
                    .parse()?;
                let registration_number = registration_number
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .ok_or(UserValidationError::MissingRegistrationNumber)?;
                Ok(Self::Organization {
                    registration_number: registration_number.to_owned(),
                    organization_type,
                })
            }
            UserType::Admin => {
                let admin_id = admin_id.ok_or(UserValidationError::MissingAdminId)?;
                Ok(Self::Admin {
                    admin_id: AdminId::new(admin_id)?,
                })
            }
        }
    }

    /// The role's closed classification.
    pub fn user_type(&self) -> UserType {
        match self {
            Self::Individual => UserType::Individual,
            Self::Organization { .. } => UserType::Organization,
            Self::Admin { .. } => UserType::Admin,
        }
    }
}

/// Lowest PIN value issued.
pub const PIN_MIN: u16 = 1000;
/// Highest PIN value issued.
pub const PIN_MAX: u16 = 9999;

/// Four-digit one-time verification code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationPin(String);

impl VerificationPin {
    /// Build a PIN from a numeric code in `PIN_MIN..=PIN_MAX`.
    pub fn from_code(code: u16) -> Result<Self, UserValidationError> {
        if !(PIN_MIN..=PIN_MAX).contains(&code) {
            return Err(UserValidationError::InvalidPin);
        }
        Ok(Self(code.to_string()))
    }

    /// Draw a PIN uniformly from `PIN_MIN..=PIN_MAX`.
    pub fn random<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(PIN_MIN..=PIN_MAX).to_string())
    }

    /// Parse a stored PIN string.
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(UserValidationError::InvalidPin);
        }
        let code: u16 = raw.parse().map_err(|_| UserValidationError::InvalidPin)?;
        Self::from_code(code)
    }

    /// Exact comparison against a caller-supplied code. No trimming or
    /// numeric coercion is applied.
    pub fn matches(&self, submitted: &str) -> bool {
        self.0 == submitted
    }

    /// String form of the PIN.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for VerificationPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Email verification lifecycle of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationState {
    /// Awaiting the PIN that was mailed at signup.
    Pending { pin: VerificationPin },
    /// PIN consumed; no code remains on the record.
    Verified,
}

/// One-way password hash as produced by a `PasswordHasher` adapter.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash string.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Persisted user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: UserId,
    pub display_name: DisplayName,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
    pub role: UserRole,
    pub verification: VerificationState,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    /// Closed classification of the account's role.
    pub fn user_type(&self) -> UserType {
        self.role.user_type()
    }

    /// Whether the account has consumed its verification PIN.
    pub fn is_verified(&self) -> bool {
        matches!(self.verification, VerificationState::Verified)
    }

    /// PIN awaiting confirmation, if the account is still unverified.
    pub fn pending_pin(&self) -> Option<&VerificationPin> {
        match &self.verification {
            VerificationState::Pending { pin } => Some(pin),
            VerificationState::Verified => None,
        }
    }
}
