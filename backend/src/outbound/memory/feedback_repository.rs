//! In-memory `FeedbackRepository` adapter.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{FeedbackRepository, FeedbackRepositoryError};
use crate::domain::{Feedback, FeedbackId, SwapRequestId, UserId};

#[derive(Debug, Default)]
pub struct InMemoryFeedbackRepository {
    entries: RwLock<Vec<Feedback>>,
}

impl InMemoryFeedbackRepository {
    pub fn with_feedback(entries: Vec<Feedback>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryFeedbackRepository {
    async fn insert(&self, feedback: &Feedback) -> Result<(), FeedbackRepositoryError> {
        let mut entries = self.entries.write().await;
        if entries.iter().any(|existing| {
            existing.request_id == feedback.request_id
                && existing.from_user_id == feedback.from_user_id
        }) {
            return Err(FeedbackRepositoryError::duplicate(
                feedback.request_id.to_string(),
                feedback.from_user_id.to_string(),
            ));
        }
        entries.push(feedback.clone());
        Ok(())
    }

    async fn delete(&self, id: &FeedbackId) -> Result<bool, FeedbackRepositoryError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|entry| &entry.id != id);
        Ok(entries.len() != before)
    }

    async fn find_by_request_and_author(
        &self,
        request_id: &SwapRequestId,
        author: &UserId,
    ) -> Result<Option<Feedback>, FeedbackRepositoryError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .find(|entry| &entry.request_id == request_id && &entry.from_user_id == author)
            .cloned())
    }

    async fn list_for_recipient(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Feedback>, FeedbackRepositoryError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|entry| &entry.to_user_id == user_id)
            .cloned()
            .collect())
    }
}
