//! Authentication primitives: signup registrations, login credentials and
//! PIN submissions.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{DisplayName, EmailAddress, UserRole, UserType, UserValidationError};

/// Domain error returned when signup, login or verification payloads are
/// invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// One of name, email, password or user type was absent or blank.
    MissingSignupFields,
    /// Neither an email nor a display name was supplied at login.
    MissingIdentifier,
    /// Password was absent or empty.
    MissingPassword,
    /// Verification request lacked an email or PIN.
    MissingVerificationFields,
    /// A field was present but failed validation.
    User(UserValidationError),
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSignupFields => write!(f, "All fields are required"),
            Self::MissingIdentifier => write!(f, "Email or name is required."),
            Self::MissingPassword => write!(f, "Password is required."),
            Self::MissingVerificationFields => write!(f, "Email and PIN are required."),
            Self::User(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for AuthValidationError {}

impl From<UserValidationError> for AuthValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::User(value)
    }
}

/// Plaintext password held only for the duration of a request.
///
/// Caller-provided whitespace is retained to avoid surprising credential
/// comparisons, and the buffer is zeroed on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap a non-empty plaintext password.
    pub fn new(raw: &str) -> Result<Self, AuthValidationError> {
        if raw.is_empty() {
            return Err(AuthValidationError::MissingPassword);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Plaintext value for hashing or comparison.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(..)")
    }
}

/// Raw signup fields as received from an inbound adapter.
#[derive(Debug, Default, Clone)]
pub struct SignupParts<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password: Option<&'a str>,
    pub user_type: Option<&'a str>,
    pub registration_number: Option<&'a str>,
    pub organization_type: Option<&'a str>,
    pub admin_id: Option<i64>,
}

/// Validated signup request.
///
/// ## Invariants
/// - `role` carries exactly the fields its user type requires.
/// - `email` is normalised; see [`EmailAddress`].
#[derive(Debug, Clone)]
pub struct Registration {
    pub display_name: DisplayName,
    pub email: EmailAddress,
    pub password: Password,
    pub role: UserRole,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.trim().is_empty())
}

impl Registration {
    /// Validate raw signup fields.
    ///
    /// Checks run in a fixed order: presence of the four core fields, then
    /// the user type, then the role-conditional fields, then the shape of
    /// name and email.
    pub fn try_from_parts(parts: SignupParts<'_>) -> Result<Self, AuthValidationError> {
        let (Some(name), Some(email), Some(password), Some(user_type)) = (
            present(parts.name),
            present(parts.email),
            parts.password.filter(|raw| !raw.is_empty()),
            present(parts.user_type),
        ) else {
            return Err(AuthValidationError::MissingSignupFields);
        };

        let user_type: UserType = user_type.parse()?;
        let role = UserRole::from_parts(
            user_type,
            parts.organization_type,
            parts.registration_number,
            parts.admin_id,
        )?;

        Ok(Self {
            display_name: DisplayName::new(name)?,
            email: EmailAddress::new(email)?,
            password: Password::new(password)?,
            role,
        })
    }
}

/// Identifier used to locate an account at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIdentifier {
    Email(EmailAddress),
    DisplayName(DisplayName),
}

/// Validated login credentials used by the session workflow.
///
/// When both an email and a name are supplied the email wins.
///
/// # Examples
/// ```
/// use foodshare::domain::{LoginCredentials, LoginIdentifier};
///
/// let creds = LoginCredentials::try_from_parts(Some("A@X.com"), Some("A"), Some("pw")).unwrap();
/// assert!(matches!(creds.identifier(), LoginIdentifier::Email(email) if email.as_ref() == "a@x.com"));
/// assert_eq!(creds.password().expose(), "pw");
/// ```
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    identifier: LoginIdentifier,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw identifier and password inputs.
    pub fn try_from_parts(
        email: Option<&str>,
        name: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, AuthValidationError> {
        let identifier = match (present(email), present(name)) {
            (Some(email), _) => LoginIdentifier::Email(EmailAddress::new(email)?),
            (None, Some(name)) => LoginIdentifier::DisplayName(DisplayName::new(name)?),
            (None, None) => return Err(AuthValidationError::MissingIdentifier),
        };
        let password = Password::new(password.unwrap_or_default())?;
        Ok(Self {
            identifier,
            password,
        })
    }

    /// Identifier used for the account lookup.
    pub fn identifier(&self) -> &LoginIdentifier {
        &self.identifier
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Email plus the PIN a caller claims was mailed to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinSubmission {
    email: EmailAddress,
    pin: String,
}

impl PinSubmission {
    /// Validate the email. The PIN is kept verbatim for exact comparison.
    pub fn try_from_parts(
        email: Option<&str>,
        pin: Option<&str>,
    ) -> Result<Self, AuthValidationError> {
        let (Some(email), Some(pin)) = (present(email), pin) else {
            return Err(AuthValidationError::MissingVerificationFields);
        };
        Ok(Self {
            email: EmailAddress::new(email)?,
            pin: pin.to_owned(),
        })
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn pin(&self) -> &str {
        self.pin.as_str()
    }
}
