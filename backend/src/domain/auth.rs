//! Authentication primitives: login credentials and signup input.
//!
//! Inbound adapters call these constructors to validate raw strings before
//! talking to the account service. Plaintext passwords live in
//! [`Zeroizing`] buffers so they are wiped once dropped.

use std::collections::BTreeSet;
use std::fmt;

use zeroize::Zeroizing;

use super::{
    AvailabilitySlot, DisplayName, EmailAddress, EmailValidationError, ProfileDetails, SkillSet,
};

/// Minimum password length accepted at signup.
pub const PASSWORD_MIN_CHARS: usize = 8;

/// Errors raised while validating login input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    InvalidEmail(EmailValidationError),
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail(err) => write!(f, "{err}"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is normalised, so lookups are case-insensitive.
/// - `password` is non-empty and keeps caller whitespace.
///
/// # Examples
/// ```
/// use skillswap::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Sarah@Example.com", "hunter22").unwrap();
/// assert_eq!(creds.email().as_ref(), "sarah@example.com");
/// assert_eq!(creds.password(), "hunter22");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw e-mail/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::new(email).map_err(LoginValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Errors raised when choosing a new password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordValidationError {
    TooShort { min: usize },
    ConfirmationMismatch,
}

impl fmt::Display for PasswordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { min } => write!(f, "password must be at least {min} characters"),
            Self::ConfirmationMismatch => write!(f, "passwords do not match"),
        }
    }
}

impl std::error::Error for PasswordValidationError {}

/// A password chosen at signup, confirmed and length-checked.
#[derive(Clone, PartialEq, Eq)]
pub struct NewPassword(Zeroizing<String>);

impl NewPassword {
    /// Accept `password` when it matches `confirmation` and is long enough.
    pub fn confirm(password: &str, confirmation: &str) -> Result<Self, PasswordValidationError> {
        if password != confirmation {
            return Err(PasswordValidationError::ConfirmationMismatch);
        }
        if password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(PasswordValidationError::TooShort {
                min: PASSWORD_MIN_CHARS,
            });
        }
        Ok(Self(Zeroizing::new(password.to_owned())))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NewPassword(..)")
    }
}

/// Everything needed to register a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    pub name: DisplayName,
    pub email: EmailAddress,
    pub password: NewPassword,
    pub avatar: Option<String>,
    pub skills_offered: SkillSet,
    pub skills_wanted: SkillSet,
    pub availability: BTreeSet<AvailabilitySlot>,
    pub details: ProfileDetails,
}
