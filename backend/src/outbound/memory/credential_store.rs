//! In-memory `CredentialStore` adapter.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::UserId;
use crate::domain::ports::{CredentialStore, CredentialStoreError, PasswordDigest};

#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    digests: RwLock<HashMap<UserId, PasswordDigest>>,
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn save(
        &self,
        user_id: &UserId,
        digest: &PasswordDigest,
    ) -> Result<(), CredentialStoreError> {
        self.digests
            .write()
            .await
            .insert(user_id.clone(), digest.clone());
        Ok(())
    }

    async fn find(&self, user_id: &UserId) -> Result<Option<PasswordDigest>, CredentialStoreError> {
        Ok(self.digests.read().await.get(user_id).cloned())
    }
}
