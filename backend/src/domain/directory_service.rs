//! User directory service implementing [`UserDirectory`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    ProfileRepository, ProfileRepositoryError, ProfileUpdate, UserDirectory,
};
use crate::domain::{
    DirectoryQuery, StoreError, SwapError, UserId, UserProfile, filter_profiles,
};

/// Map profile store failures onto core errors.
pub(crate) fn map_profile_error(error: ProfileRepositoryError) -> SwapError {
    match error {
        ProfileRepositoryError::DuplicateEmail { email } => {
            SwapError::conflict(format!("email {email} is already registered"))
        }
        ProfileRepositoryError::DuplicateId { id } => {
            SwapError::conflict(format!("profile {id} already exists"))
        }
        other => SwapError::Store(StoreError::from(other)),
    }
}

/// Directory service backed by a [`ProfileRepository`].
#[derive(Clone)]
pub struct UserDirectoryService<P> {
    profiles: Arc<P>,
}

impl<P> UserDirectoryService<P> {
    pub fn new(profiles: Arc<P>) -> Self {
        Self { profiles }
    }
}

impl<P> UserDirectoryService<P>
where
    P: ProfileRepository,
{
    async fn require(&self, id: &UserId) -> Result<UserProfile, SwapError> {
        self.profiles
            .find_by_id(id)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| SwapError::not_found("user", id))
    }
}

#[async_trait]
impl<P> UserDirectory for UserDirectoryService<P>
where
    P: ProfileRepository,
{
    async fn get_by_id(&self, id: &UserId) -> Result<UserProfile, SwapError> {
        self.require(id).await
    }

    async fn list(&self, query: &DirectoryQuery) -> Result<Vec<UserProfile>, SwapError> {
        let snapshot = self.profiles.list_all().await.map_err(map_profile_error)?;
        Ok(filter_profiles(snapshot, query))
    }

    async fn upsert(&self, profile: UserProfile) -> Result<UserProfile, SwapError> {
        self.profiles
            .upsert(&profile)
            .await
            .map_err(map_profile_error)?;
        debug!(user_id = %profile.id, "profile stored");
        Ok(profile)
    }

    async fn update_profile(
        &self,
        actor: &UserId,
        update: ProfileUpdate,
    ) -> Result<UserProfile, SwapError> {
        let updated = self
            .profiles
            .apply_update(actor, update)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| SwapError::not_found("user", actor))?;
        info!(user_id = %updated.id, is_public = updated.is_public, "profile updated");
        Ok(updated)
    }
}
