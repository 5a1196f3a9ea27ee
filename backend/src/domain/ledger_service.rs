//! Swap request ledger service implementing [`RequestLedger`].
//!
//! Creation validates both participants and the skill-membership rules
//! before anything is written. Transitions are computed on a snapshot and
//! persisted with a compare-and-set on the observed status; the loser of a
//! race receives [`SwapError::Conflict`] and the stored request is untouched.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::directory_service::map_profile_error;
use crate::domain::ports::{
    CreateSwapRequest, ProfileRepository, RequestLedger, SwapRequestRepository,
    SwapRequestRepositoryError,
};
use crate::domain::{
    MESSAGE_MAX_CHARS, Skill, StoreError, SwapError, SwapRequest, SwapRequestDraft,
    SwapRequestId, SwapStatus, UserId, UserProfile,
};

/// Map request store failures onto core errors.
pub(crate) fn map_request_error(error: SwapRequestRepositoryError) -> SwapError {
    match error {
        SwapRequestRepositoryError::NotFound { id } => SwapError::not_found("request", id),
        SwapRequestRepositoryError::StatusMismatch { expected, actual } => SwapError::conflict(
            format!("request changed concurrently: expected {expected}, found {actual}"),
        ),
        other => SwapError::Store(StoreError::from(other)),
    }
}

fn normalise_message(message: Option<String>) -> Result<Option<String>, SwapError> {
    let Some(trimmed) = message
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
    else {
        return Ok(None);
    };
    if trimmed.chars().count() > MESSAGE_MAX_CHARS {
        return Err(SwapError::invalid_input(
            "message",
            format!("must be at most {MESSAGE_MAX_CHARS} characters"),
        ));
    }
    Ok(Some(trimmed))
}

/// Resolve `label` against the skills `owner` offers, returning the stored
/// spelling. A label that is not a valid skill can never be offered, so it
/// is a mismatch too.
fn offered_by(owner: &UserProfile, label: &str) -> Result<Skill, SwapError> {
    let mismatch = || SwapError::SkillMismatch {
        user_id: owner.id.clone(),
        skill: label.trim().to_owned(),
    };
    let candidate = Skill::new(label).map_err(|_| mismatch())?;
    owner
        .skills_offered
        .find(candidate.as_ref())
        .cloned()
        .ok_or_else(mismatch)
}

/// Ledger service backed by profile and request repositories.
#[derive(Clone)]
pub struct RequestLedgerService<P, R> {
    profiles: Arc<P>,
    requests: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<P, R> RequestLedgerService<P, R> {
    pub fn new(profiles: Arc<P>, requests: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            profiles,
            requests,
            clock,
        }
    }
}

impl<P, R> RequestLedgerService<P, R>
where
    P: ProfileRepository,
    R: SwapRequestRepository,
{
    async fn participant(&self, user_id: &UserId) -> Result<UserProfile, SwapError> {
        self.profiles
            .find_by_id(user_id)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| SwapError::UnknownUser {
                user_id: user_id.clone(),
            })
    }

    async fn draft(&self, request: CreateSwapRequest) -> Result<SwapRequestDraft, SwapError> {
        let CreateSwapRequest {
            from_user_id,
            to_user_id,
            offered_skill,
            wanted_skill,
            message,
        } = request;

        let sender = self.participant(&from_user_id).await?;
        let recipient = self.participant(&to_user_id).await?;
        if sender.id == recipient.id {
            return Err(SwapError::invalid_input(
                "toUserId",
                "cannot request a swap with yourself",
            ));
        }

        Ok(SwapRequestDraft {
            offered_skill: offered_by(&sender, &offered_skill)?,
            wanted_skill: offered_by(&recipient, &wanted_skill)?,
            message: normalise_message(message)?,
            from_user_id,
            to_user_id,
        })
    }
}

#[async_trait]
impl<P, R> RequestLedger for RequestLedgerService<P, R>
where
    P: ProfileRepository,
    R: SwapRequestRepository,
{
    async fn create(&self, request: CreateSwapRequest) -> Result<SwapRequest, SwapError> {
        let draft = match self.draft(request).await {
            Ok(draft) => draft,
            Err(err) => {
                debug!(error = %err, "swap request rejected");
                return Err(err);
            }
        };

        let opened = SwapRequest::open(SwapRequestId::random(), draft, self.clock.utc());
        self.requests
            .insert(&opened)
            .await
            .map_err(map_request_error)?;
        info!(
            request_id = %opened.id(),
            from_user_id = %opened.from_user_id(),
            to_user_id = %opened.to_user_id(),
            "swap request opened"
        );
        Ok(opened)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<SwapRequest>, SwapError> {
        self.requests
            .list_for_user(user_id)
            .await
            .map_err(map_request_error)
    }

    async fn transition(
        &self,
        id: &SwapRequestId,
        next: SwapStatus,
        actor: &UserId,
    ) -> Result<SwapRequest, SwapError> {
        let current = self
            .requests
            .find_by_id(id)
            .await
            .map_err(map_request_error)?
            .ok_or_else(|| SwapError::not_found("request", id))?;

        let moved = current
            .transition(next, actor, self.clock.utc())
            .inspect_err(|err| debug!(request_id = %id, error = %err, "transition refused"))?;

        match self.requests.update_if_status(&moved, current.status()).await {
            Ok(()) => {
                info!(
                    request_id = %id,
                    from = %current.status(),
                    status = %moved.status(),
                    actor = %actor,
                    "swap request transitioned"
                );
                Ok(moved)
            }
            Err(err @ SwapRequestRepositoryError::StatusMismatch { .. }) => {
                warn!(request_id = %id, error = %err, "transition lost a race");
                Err(map_request_error(err))
            }
            Err(err) => Err(map_request_error(err)),
        }
    }
}

#[cfg(test)]
#[path = "ledger_service_tests.rs"]
mod tests;
