//! Feedback service implementing [`FeedbackCommand`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, info};

use crate::domain::directory_service::map_profile_error;
use crate::domain::ledger_service::map_request_error;
use crate::domain::ports::{
    FeedbackCommand, FeedbackRepository, FeedbackRepositoryError, ProfileRepository,
    SubmitFeedback, SwapRequestRepository,
};
use crate::domain::{
    COMMENT_MAX_CHARS, Feedback, FeedbackId, StoreError, SwapError, SwapStatus, UserId,
};

fn map_feedback_error(error: FeedbackRepositoryError) -> SwapError {
    match error {
        FeedbackRepositoryError::Duplicate { request_id, .. } => {
            SwapError::conflict(format!("feedback already left on request {request_id}"))
        }
        other => SwapError::Store(StoreError::from(other)),
    }
}

fn normalise_comment(comment: Option<String>) -> Result<Option<String>, SwapError> {
    let comment = comment
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty());
    match comment {
        Some(text) if text.chars().count() > COMMENT_MAX_CHARS => Err(SwapError::invalid_input(
            "comment",
            format!("must be at most {COMMENT_MAX_CHARS} characters"),
        )),
        other => Ok(other),
    }
}

/// Feedback service; also maintains the recipient's running rating.
#[derive(Clone)]
pub struct FeedbackService<P, R, F> {
    profiles: Arc<P>,
    requests: Arc<R>,
    feedback: Arc<F>,
    clock: Arc<dyn Clock>,
}

impl<P, R, F> FeedbackService<P, R, F> {
    pub fn new(
        profiles: Arc<P>,
        requests: Arc<R>,
        feedback: Arc<F>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            profiles,
            requests,
            feedback,
            clock,
        }
    }
}

impl<P, R, F> FeedbackService<P, R, F>
where
    P: ProfileRepository,
    R: SwapRequestRepository,
    F: FeedbackRepository,
{
    async fn apply_rating(&self, recipient: &UserId, score: u8) -> Result<(), SwapError> {
        let rating = self
            .profiles
            .record_rating(recipient, score)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| SwapError::UnknownUser {
                user_id: recipient.clone(),
            })?;
        debug!(
            user_id = %recipient,
            total_ratings = rating.total_ratings(),
            "rating updated"
        );
        Ok(())
    }
}

#[async_trait]
impl<P, R, F> FeedbackCommand for FeedbackService<P, R, F>
where
    P: ProfileRepository,
    R: SwapRequestRepository,
    F: FeedbackRepository,
{
    async fn submit(&self, input: SubmitFeedback) -> Result<Feedback, SwapError> {
        let SubmitFeedback {
            author,
            request_id,
            score,
            comment,
        } = input;

        let request = self
            .requests
            .find_by_id(&request_id)
            .await
            .map_err(map_request_error)?
            .ok_or_else(|| SwapError::not_found("request", request_id))?;
        let Some(recipient) = request.counterpart_of(&author).cloned() else {
            return Err(SwapError::forbidden(
                "only participants may leave feedback",
            ));
        };
        if request.status() != SwapStatus::Completed {
            return Err(SwapError::conflict(format!(
                "feedback needs a completed request, this one is {}",
                request.status()
            )));
        }
        if self
            .feedback
            .find_by_request_and_author(&request_id, &author)
            .await
            .map_err(map_feedback_error)?
            .is_some()
        {
            debug!(request_id = %request_id, author = %author, "duplicate feedback refused");
            return Err(SwapError::conflict(format!(
                "feedback already left on request {request_id}"
            )));
        }

        let entry = Feedback {
            id: FeedbackId::random(),
            request_id,
            from_user_id: author,
            to_user_id: recipient,
            score,
            comment: normalise_comment(comment)?,
            created_at: self.clock.utc(),
        };
        self.feedback
            .insert(&entry)
            .await
            .map_err(map_feedback_error)?;
        if let Err(err) = self.apply_rating(&entry.to_user_id, score.get()).await {
            error!(feedback_id = %entry.id, error = %err, "rating update failed; rolling back feedback");
            if let Err(cleanup) = self.feedback.delete(&entry.id).await {
                error!(feedback_id = %entry.id, error = %cleanup, "feedback rollback failed");
            }
            return Err(err);
        }
        info!(
            feedback_id = %entry.id,
            request_id = %entry.request_id,
            to_user_id = %entry.to_user_id,
            score = score.get(),
            "feedback recorded"
        );
        Ok(entry)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Feedback>, SwapError> {
        self.feedback
            .list_for_recipient(user_id)
            .await
            .map_err(map_feedback_error)
    }
}
