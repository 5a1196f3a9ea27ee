//! Read-only marketplace statistics and the administrator policy.

use serde::Serialize;
use utoipa::ToSchema;

use super::{SwapError, SwapRequest, SwapStatus, UserProfile};

/// Summary figures for the admin overview.
///
/// `total_swaps` counts requests that reached agreement (accepted or
/// completed); `completed_swaps` counts completed requests only.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_users: usize,
    pub total_swaps: usize,
    pub completed_swaps: usize,
    pub pending_requests: usize,
    /// Mean rating over rated users; `0` when nobody has been rated.
    pub average_rating: f64,
    /// `completed_swaps / total_swaps`, or `0` without agreed swaps.
    pub completion_rate: f64,
    /// `total_swaps / total_users`, or `0` without users.
    pub swaps_per_user: f64,
}

fn as_f64(count: usize) -> f64 {
    // Marketplace counts stay far below 2^52.
    count as f64
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        as_f64(numerator) / as_f64(denominator)
    }
}

impl AdminStats {
    /// Derive statistics from full snapshots of both stores.
    pub fn aggregate(profiles: &[UserProfile], requests: &[SwapRequest]) -> Self {
        let count = |status: SwapStatus| requests.iter().filter(|r| r.status() == status).count();
        let completed_swaps = count(SwapStatus::Completed);
        let total_swaps = completed_swaps + count(SwapStatus::Accepted);
        let pending_requests = count(SwapStatus::Pending);

        let rated: Vec<f64> = profiles
            .iter()
            .filter_map(|profile| profile.rating.average())
            .collect();
        let average_rating = if rated.is_empty() {
            0.0
        } else {
            rated.iter().sum::<f64>() / as_f64(rated.len())
        };

        Self {
            total_users: profiles.len(),
            total_swaps,
            completed_swaps,
            pending_requests,
            average_rating,
            completion_rate: ratio(completed_swaps, total_swaps),
            swaps_per_user: ratio(total_swaps, profiles.len()),
        }
    }
}

/// Decides who may use administrator operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct AdminPolicy;

impl AdminPolicy {
    /// Succeed only when `actor` holds the admin role.
    pub fn ensure_admin(self, actor: &UserProfile) -> Result<(), SwapError> {
        if actor.is_admin() {
            Ok(())
        } else {
            Err(SwapError::forbidden("administrator role required"))
        }
    }
}
