//! Feedback left by one swap participant about the other.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{SwapRequestId, UserId};

/// Maximum comment length.
pub const COMMENT_MAX_CHARS: usize = 2000;

/// Identifier of a feedback entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackId(Uuid);

impl FeedbackId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("score must be between 1 and 5, got {0}")]
pub struct FeedbackScoreError(pub u8);

/// Whole-star score between 1 and 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct FeedbackScore(u8);

impl FeedbackScore {
    pub fn new(value: u8) -> Result<Self, FeedbackScoreError> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(FeedbackScoreError(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for FeedbackScore {
    type Error = FeedbackScoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FeedbackScore> for u8 {
    fn from(value: FeedbackScore) -> Self {
        value.0
    }
}

/// A rating and optional comment tied to one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[schema(value_type = String, format = Uuid)]
    pub id: FeedbackId,
    #[schema(value_type = String, format = Uuid)]
    pub request_id: SwapRequestId,
    #[schema(value_type = String, format = Uuid)]
    pub from_user_id: UserId,
    #[schema(value_type = String, format = Uuid)]
    pub to_user_id: UserId,
    #[schema(value_type = u8, minimum = 1, maximum = 5)]
    #[serde(rename = "rating")]
    pub score: FeedbackScore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}
