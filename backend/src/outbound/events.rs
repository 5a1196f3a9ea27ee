//! Swap event publisher that writes each event to the structured log.
//!
//! Stands in for an external notification channel; subscribers can tail
//! the `swap_events` target.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{SwapEvent, SwapEventPublisher, SwapEventPublisherError};

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSwapEventPublisher;

#[async_trait]
impl SwapEventPublisher for TracingSwapEventPublisher {
    async fn publish(&self, event: &SwapEvent) -> Result<(), SwapEventPublisherError> {
        let payload = serde_json::to_string(event)
            .map_err(|err| SwapEventPublisherError::publish(err.to_string()))?;
        info!(
            target: "swap_events",
            request_id = %event.request_id,
            status = %event.status,
            %payload,
            "swap event"
        );
        Ok(())
    }
}
