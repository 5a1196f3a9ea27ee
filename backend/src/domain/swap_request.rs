//! Skill swap requests and their status state machine.
//!
//! A request moves `pending -> accepted | rejected` and `accepted ->
//! completed`. Rejected and completed requests are terminal. Every edge names
//! who may take it; [`SwapRequest::transition`] checks the edge before the
//! actor so an impossible move is reported as such even to outsiders.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Skill, SwapError, UserId};

/// Maximum length of the optional message attached to a request.
pub const MESSAGE_MAX_CHARS: usize = 1000;

/// Identifier of a swap request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwapRequestId(Uuid);

impl SwapRequestId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SwapRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SwapRequestId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Lifecycle status of a swap request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SwapStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
}

impl SwapStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }

    /// Whether no further transitions are possible.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Completed)
    }
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a user relates to a particular request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantRole {
    Sender,
    Recipient,
    Outsider,
}

/// Who may take a permitted edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeActor {
    RecipientOnly,
    EitherParticipant,
}

fn permitted_edge(from: SwapStatus, to: SwapStatus) -> Option<EdgeActor> {
    match (from, to) {
        (SwapStatus::Pending, SwapStatus::Accepted | SwapStatus::Rejected) => {
            Some(EdgeActor::RecipientOnly)
        }
        (SwapStatus::Accepted, SwapStatus::Completed) => Some(EdgeActor::EitherParticipant),
        _ => None,
    }
}

/// Validated input for opening a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequestDraft {
    pub from_user_id: UserId,
    pub to_user_id: UserId,
    pub offered_skill: Skill,
    pub wanted_skill: Skill,
    pub message: Option<String>,
}

/// A proposal to exchange one offered skill for a skill the recipient offers.
///
/// ## Invariants
/// - `updated_at >= created_at`, and each transition strictly increases it.
/// - only [`SwapRequest::transition`] changes `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    #[schema(value_type = String, format = Uuid)]
    id: SwapRequestId,
    #[schema(value_type = String, format = Uuid)]
    from_user_id: UserId,
    #[schema(value_type = String, format = Uuid)]
    to_user_id: UserId,
    #[schema(value_type = String, example = "Guitar")]
    offered_skill: Skill,
    #[schema(value_type = String, example = "Spanish")]
    wanted_skill: Skill,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    status: SwapStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SwapRequest {
    /// Open a new pending request with `created_at == updated_at == at`.
    pub fn open(id: SwapRequestId, draft: SwapRequestDraft, at: DateTime<Utc>) -> Self {
        let SwapRequestDraft {
            from_user_id,
            to_user_id,
            offered_skill,
            wanted_skill,
            message,
        } = draft;
        Self {
            id,
            from_user_id,
            to_user_id,
            offered_skill,
            wanted_skill,
            message,
            status: SwapStatus::Pending,
            created_at: at,
            updated_at: at,
        }
    }

    pub fn id(&self) -> SwapRequestId {
        self.id
    }

    pub fn from_user_id(&self) -> &UserId {
        &self.from_user_id
    }

    pub fn to_user_id(&self) -> &UserId {
        &self.to_user_id
    }

    pub fn offered_skill(&self) -> &Skill {
        &self.offered_skill
    }

    pub fn wanted_skill(&self) -> &Skill {
        &self.wanted_skill
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn status(&self) -> SwapStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Classify `user_id` relative to this request.
    pub fn role_of(&self, user_id: &UserId) -> ParticipantRole {
        if &self.to_user_id == user_id {
            ParticipantRole::Recipient
        } else if &self.from_user_id == user_id {
            ParticipantRole::Sender
        } else {
            ParticipantRole::Outsider
        }
    }

    pub fn involves(&self, user_id: &UserId) -> bool {
        !matches!(self.role_of(user_id), ParticipantRole::Outsider)
    }

    /// The participant on the other side from `user_id`, if `user_id` takes part.
    pub fn counterpart_of(&self, user_id: &UserId) -> Option<&UserId> {
        match self.role_of(user_id) {
            ParticipantRole::Sender => Some(&self.to_user_id),
            ParticipantRole::Recipient => Some(&self.from_user_id),
            ParticipantRole::Outsider => None,
        }
    }

    /// Compute the request after moving to `next` on behalf of `actor`.
    ///
    /// The receiver is left untouched; callers persist the returned value with
    /// a compare-and-set on the current status.
    ///
    /// # Errors
    /// - [`SwapError::InvalidTransition`] when the edge does not exist.
    /// - [`SwapError::Forbidden`] when `actor` may not take the edge.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use skillswap::domain::{
    ///     Skill, SwapError, SwapRequest, SwapRequestDraft, SwapRequestId, SwapStatus, UserId,
    /// };
    ///
    /// let sender = UserId::random();
    /// let recipient = UserId::random();
    /// let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    /// let request = SwapRequest::open(
    ///     SwapRequestId::random(),
    ///     SwapRequestDraft {
    ///         from_user_id: sender.clone(),
    ///         to_user_id: recipient.clone(),
    ///         offered_skill: Skill::new("Guitar").unwrap(),
    ///         wanted_skill: Skill::new("Spanish").unwrap(),
    ///         message: None,
    ///     },
    ///     at,
    /// );
    ///
    /// let accepted = request
    ///     .transition(SwapStatus::Accepted, &recipient, at)
    ///     .unwrap();
    /// assert_eq!(accepted.status(), SwapStatus::Accepted);
    /// assert!(accepted.updated_at() > accepted.created_at());
    ///
    /// let err = request.transition(SwapStatus::Accepted, &sender, at).unwrap_err();
    /// assert!(matches!(err, SwapError::Forbidden { .. }));
    /// ```
    pub fn transition(
        &self,
        next: SwapStatus,
        actor: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Self, SwapError> {
        let Some(edge) = permitted_edge(self.status, next) else {
            return Err(SwapError::InvalidTransition {
                from: self.status,
                to: next,
            });
        };

        let allowed = match (edge, self.role_of(actor)) {
            (_, ParticipantRole::Outsider) => false,
            (EdgeActor::RecipientOnly, role) => role == ParticipantRole::Recipient,
            (EdgeActor::EitherParticipant, _) => true,
        };
        if !allowed {
            return Err(SwapError::Forbidden {
                reason: format!("user may not move request {} to {next}", self.id),
            });
        }

        let floor = self.updated_at + Duration::milliseconds(1);
        Ok(Self {
            status: next,
            updated_at: now.max(floor),
            ..self.clone()
        })
    }
}
