//! Typed failures returned by the marketplace core.
//!
//! These carry no HTTP semantics. The inbound adapter translates them into
//! transport errors; services never format user-facing text beyond the
//! diagnostic `Display` below.

use thiserror::Error;

use super::ports::{
    CredentialStoreError, FeedbackRepositoryError, PasswordHasherError, ProfileRepositoryError,
    SwapRequestRepositoryError,
};
use super::{SwapStatus, UserId};

/// A driven port failed in a way the core cannot interpret.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error(transparent)]
    Profiles(#[from] ProfileRepositoryError),
    #[error(transparent)]
    Requests(#[from] SwapRequestRepositoryError),
    #[error(transparent)]
    Feedback(#[from] FeedbackRepositoryError),
    #[error(transparent)]
    Credentials(#[from] CredentialStoreError),
    #[error(transparent)]
    Hasher(#[from] PasswordHasherError),
}

/// Core error kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwapError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    #[error("user {user_id} does not exist")]
    UnknownUser { user_id: UserId },
    #[error("user {user_id} does not offer {skill}")]
    SkillMismatch { user_id: UserId, skill: String },
    #[error("cannot move a {from} request to {to}")]
    InvalidTransition { from: SwapStatus, to: SwapStatus },
    #[error("forbidden: {reason}")]
    Forbidden { reason: String },
    #[error("conflict: {reason}")]
    Conflict { reason: String },
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl SwapError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    pub fn invalid_input(field: &'static str, reason: impl ToString) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.to_string(),
        }
    }

    /// Stable snake_case name of the error kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::UnknownUser { .. } => "unknown_user",
            Self::SkillMismatch { .. } => "skill_mismatch",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::Forbidden { .. } => "forbidden",
            Self::Conflict { .. } => "conflict",
            Self::InvalidInput { .. } => "invalid_input",
            Self::Store(_) => "store",
        }
    }
}
