//! In-memory `SwapRequestRepository` adapter with compare-and-set updates.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{SwapRequestRepository, SwapRequestRepositoryError};
use crate::domain::{SwapRequest, SwapRequestId, SwapStatus, UserId};

/// Request store keeping records in creation order.
#[derive(Debug, Default)]
pub struct InMemorySwapRequestRepository {
    requests: RwLock<Vec<SwapRequest>>,
}

impl InMemorySwapRequestRepository {
    pub fn with_requests(requests: Vec<SwapRequest>) -> Self {
        Self {
            requests: RwLock::new(requests),
        }
    }
}

#[async_trait]
impl SwapRequestRepository for InMemorySwapRequestRepository {
    async fn insert(&self, request: &SwapRequest) -> Result<(), SwapRequestRepositoryError> {
        let mut requests = self.requests.write().await;
        if requests.iter().any(|existing| existing.id() == request.id()) {
            return Err(SwapRequestRepositoryError::query(format!(
                "request {} already exists",
                request.id()
            )));
        }
        requests.push(request.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &SwapRequestId,
    ) -> Result<Option<SwapRequest>, SwapRequestRepositoryError> {
        let requests = self.requests.read().await;
        Ok(requests.iter().find(|request| &request.id() == id).cloned())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<SwapRequest>, SwapRequestRepositoryError> {
        let requests = self.requests.read().await;
        Ok(requests
            .iter()
            .filter(|request| request.involves(user_id))
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<SwapRequest>, SwapRequestRepositoryError> {
        Ok(self.requests.read().await.clone())
    }

    async fn update_if_status(
        &self,
        request: &SwapRequest,
        expected: SwapStatus,
    ) -> Result<(), SwapRequestRepositoryError> {
        let mut requests = self.requests.write().await;
        let slot = requests
            .iter_mut()
            .find(|existing| existing.id() == request.id())
            .ok_or_else(|| SwapRequestRepositoryError::not_found(request.id().to_string()))?;
        if slot.status() != expected {
            return Err(SwapRequestRepositoryError::status_mismatch(
                expected,
                slot.status(),
            ));
        }
        *slot = request.clone();
        Ok(())
    }
}
