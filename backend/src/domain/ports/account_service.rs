//! Driving port for signup and login.
//!
//! Inbound adapters call this port to register and authenticate members
//! without importing the credential infrastructure, so handler tests can
//! substitute a double.

use async_trait::async_trait;

use crate::domain::{LoginCredentials, SignupRequest, SwapError, UserProfile};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a member and store their credentials.
    ///
    /// # Errors
    /// [`SwapError::Conflict`] when the e-mail is taken.
    async fn signup(&self, request: SignupRequest) -> Result<UserProfile, SwapError>;

    /// Authenticate and return the member's profile.
    ///
    /// Unknown e-mails and wrong passwords both yield [`SwapError::Forbidden`].
    async fn login(&self, credentials: &LoginCredentials) -> Result<UserProfile, SwapError>;
}
