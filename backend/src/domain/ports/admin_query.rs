//! Driving port for the administrator overview.

use async_trait::async_trait;

use crate::domain::{AdminStats, SwapError, UserId, UserProfile};

/// Admin use-cases; every call requires the admin role on `actor`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminQuery: Send + Sync {
    async fn stats(&self, actor: &UserId) -> Result<AdminStats, SwapError>;

    /// Every profile including private ones, in directory order.
    async fn list_all_users(&self, actor: &UserId) -> Result<Vec<UserProfile>, SwapError>;
}
