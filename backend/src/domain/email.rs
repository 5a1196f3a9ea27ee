//! Contact e-mail address used as the login key.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for [`EmailAddress`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailValidationError {
    #[error("email must not be empty")]
    Empty,
    #[error("email must contain exactly one '@' with text on both sides")]
    MissingSeparator,
    #[error("email domain must contain a dot")]
    InvalidDomain,
    #[error("email must not contain whitespace")]
    ContainsWhitespace,
}

/// Normalised e-mail address.
///
/// ## Invariants
/// - trimmed and lower-cased, so equality is case-insensitive.
/// - a single `@` separates a non-empty local part from a dotted domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and normalise an address.
    ///
    /// # Examples
    /// ```
    /// use skillswap::domain::EmailAddress;
    ///
    /// let email = EmailAddress::new("  Sarah@Example.com ").unwrap();
    /// assert_eq!(email.as_ref(), "sarah@example.com");
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(EmailValidationError::ContainsWhitespace);
        }

        let mut parts = trimmed.split('@');
        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(EmailValidationError::MissingSeparator);
        };
        if local.is_empty() || domain.is_empty() {
            return Err(EmailValidationError::MissingSeparator);
        }
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(EmailValidationError::InvalidDomain);
        }

        Ok(Self(trimmed.to_lowercase()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
