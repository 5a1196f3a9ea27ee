//! Administrator overview implementing [`AdminQuery`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::directory_service::map_profile_error;
use crate::domain::ledger_service::map_request_error;
use crate::domain::ports::{AdminQuery, ProfileRepository, SwapRequestRepository};
use crate::domain::{AdminPolicy, AdminStats, SwapError, UserId, UserProfile};

#[derive(Clone)]
pub struct AdminService<P, R> {
    profiles: Arc<P>,
    requests: Arc<R>,
}

impl<P, R> AdminService<P, R> {
    pub fn new(profiles: Arc<P>, requests: Arc<R>) -> Self {
        Self { profiles, requests }
    }
}

impl<P, R> AdminService<P, R>
where
    P: ProfileRepository,
    R: SwapRequestRepository,
{
    async fn authorise(&self, actor: &UserId) -> Result<(), SwapError> {
        let profile = self
            .profiles
            .find_by_id(actor)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| SwapError::not_found("user", actor))?;
        AdminPolicy.ensure_admin(&profile).inspect_err(|_| {
            warn!(user_id = %actor, "non-admin attempted an admin query");
        })
    }
}

#[async_trait]
impl<P, R> AdminQuery for AdminService<P, R>
where
    P: ProfileRepository,
    R: SwapRequestRepository,
{
    async fn stats(&self, actor: &UserId) -> Result<AdminStats, SwapError> {
        self.authorise(actor).await?;
        let profiles = self.profiles.list_all().await.map_err(map_profile_error)?;
        let requests = self.requests.list_all().await.map_err(map_request_error)?;
        let stats = AdminStats::aggregate(&profiles, &requests);
        debug!(
            total_users = stats.total_users,
            total_swaps = stats.total_swaps,
            "admin stats computed"
        );
        Ok(stats)
    }

    async fn list_all_users(&self, actor: &UserId) -> Result<Vec<UserProfile>, SwapError> {
        self.authorise(actor).await?;
        self.profiles.list_all().await.map_err(map_profile_error)
    }
}
