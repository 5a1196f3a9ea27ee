//! Driving port for leaving and reading feedback.

use async_trait::async_trait;

use crate::domain::{Feedback, FeedbackScore, SwapError, SwapRequestId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitFeedback {
    pub author: UserId,
    pub request_id: SwapRequestId,
    pub score: FeedbackScore,
    pub comment: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackCommand: Send + Sync {
    /// Record feedback about the other participant of a completed request
    /// and fold the score into their rating.
    async fn submit(&self, feedback: SubmitFeedback) -> Result<Feedback, SwapError>;

    /// Feedback received by `user_id`, oldest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Feedback>, SwapError>;
}
