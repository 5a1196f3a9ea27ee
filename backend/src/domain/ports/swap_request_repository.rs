//! Port for swap request persistence.
//!
//! Status changes go through [`SwapRequestRepository::update_if_status`], a
//! compare-and-set keyed on the status the caller last observed. Two racing
//! transitions of one request therefore cannot both succeed.

use async_trait::async_trait;

use crate::domain::{SwapRequest, SwapRequestId, SwapStatus, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by swap request repository adapters.
    pub enum SwapRequestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "request repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "request repository query failed: {message}",
        /// The request to update does not exist.
        NotFound { id: String } =>
            "request {id} not found",
        /// The stored status no longer matches the caller's expectation.
        StatusMismatch { expected: SwapStatus, actual: SwapStatus } =>
            "status mismatch: expected {expected}, found {actual}",
    }
}

/// Port for storing swap requests in creation order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SwapRequestRepository: Send + Sync {
    /// Append a freshly opened request.
    async fn insert(&self, request: &SwapRequest) -> Result<(), SwapRequestRepositoryError>;

    async fn find_by_id(
        &self,
        id: &SwapRequestId,
    ) -> Result<Option<SwapRequest>, SwapRequestRepositoryError>;

    /// Requests where `user_id` is sender or recipient, oldest first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<SwapRequest>, SwapRequestRepositoryError>;

    /// Every request, oldest first.
    async fn list_all(&self) -> Result<Vec<SwapRequest>, SwapRequestRepositoryError>;

    /// Replace the stored request only if its status still equals `expected`.
    ///
    /// # Errors
    /// - [`SwapRequestRepositoryError::NotFound`] when the id is unknown.
    /// - [`SwapRequestRepositoryError::StatusMismatch`] when another writer
    ///   changed the status first; nothing is written.
    async fn update_if_status(
        &self,
        request: &SwapRequest,
        expected: SwapStatus,
    ) -> Result<(), SwapRequestRepositoryError>;
}
