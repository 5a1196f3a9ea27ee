//! Port for feedback persistence.

use async_trait::async_trait;

use crate::domain::{Feedback, FeedbackId, SwapRequestId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by feedback repository adapters.
    pub enum FeedbackRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "feedback repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "feedback repository query failed: {message}",
        /// The author already left feedback on this request.
        Duplicate { request_id: String, author: String } =>
            "user {author} already left feedback on request {request_id}",
    }
}

/// Port for storing feedback in submission order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Store feedback, rejecting a second entry by the same author on the
    /// same request.
    async fn insert(&self, feedback: &Feedback) -> Result<(), FeedbackRepositoryError>;

    /// Remove an entry; returns whether one was removed.
    async fn delete(&self, id: &FeedbackId) -> Result<bool, FeedbackRepositoryError>;

    async fn find_by_request_and_author(
        &self,
        request_id: &SwapRequestId,
        author: &UserId,
    ) -> Result<Option<Feedback>, FeedbackRepositoryError>;

    /// Feedback received by `user_id`, oldest first.
    async fn list_for_recipient(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Feedback>, FeedbackRepositoryError>;
}
