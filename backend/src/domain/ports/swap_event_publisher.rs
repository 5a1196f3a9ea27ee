//! Port for announcing swap request changes to an external channel.
//!
//! The core never publishes; the calling layer does so after each successful
//! create or transition. Publishing failures must not roll back the ledger.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{SwapRequest, SwapRequestId, SwapStatus, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised while publishing swap events.
    pub enum SwapEventPublisherError {
        /// The channel rejected or dropped the event.
        Publish { message: String } =>
            "failed to publish swap event: {message}",
    }
}

/// Notification payload for a created or transitioned request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapEvent {
    pub request_id: SwapRequestId,
    pub status: SwapStatus,
    pub from_user_id: UserId,
    pub to_user_id: UserId,
}

impl From<&SwapRequest> for SwapEvent {
    fn from(request: &SwapRequest) -> Self {
        Self {
            request_id: request.id(),
            status: request.status(),
            from_user_id: request.from_user_id().clone(),
            to_user_id: request.to_user_id().clone(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SwapEventPublisher: Send + Sync {
    async fn publish(&self, event: &SwapEvent) -> Result<(), SwapEventPublisherError>;
}

/// Publisher that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpSwapEventPublisher;

#[async_trait]
impl SwapEventPublisher for NoOpSwapEventPublisher {
    async fn publish(&self, _event: &SwapEvent) -> Result<(), SwapEventPublisherError> {
        Ok(())
    }
}
