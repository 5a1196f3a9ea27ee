//! Driving port for the swap request ledger.

use async_trait::async_trait;

use crate::domain::{SwapError, SwapRequest, SwapRequestId, SwapStatus, UserId};

/// Raw input for opening a request; skills are matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSwapRequest {
    pub from_user_id: UserId,
    pub to_user_id: UserId,
    pub offered_skill: String,
    pub wanted_skill: String,
    pub message: Option<String>,
}

/// Ledger use-cases consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestLedger: Send + Sync {
    /// Validate and open a pending request.
    ///
    /// # Errors
    /// [`SwapError::UnknownUser`], [`SwapError::SkillMismatch`] or
    /// [`SwapError::InvalidInput`]; the ledger is unchanged on failure.
    async fn create(&self, request: CreateSwapRequest) -> Result<SwapRequest, SwapError>;

    /// Requests where `user_id` takes part, oldest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<SwapRequest>, SwapError>;

    /// Move a request along the state machine on behalf of `actor`.
    ///
    /// # Errors
    /// [`SwapError::NotFound`], [`SwapError::InvalidTransition`],
    /// [`SwapError::Forbidden`], or [`SwapError::Conflict`] when a concurrent
    /// transition won.
    async fn transition(
        &self,
        id: &SwapRequestId,
        next: SwapStatus,
        actor: &UserId,
    ) -> Result<SwapRequest, SwapError>;
}
