//! Driving port for the user directory.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::{
    AvailabilitySlot, DirectoryQuery, DisplayName, ProfileDetails, SkillSet, SwapError, UserId,
    UserProfile,
};

/// Owner-editable profile fields.
///
/// Identity, e-mail, join date, rating and role are absent; they stay as
/// stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: DisplayName,
    pub avatar: Option<String>,
    pub skills_offered: SkillSet,
    pub skills_wanted: SkillSet,
    pub availability: BTreeSet<AvailabilitySlot>,
    pub is_public: bool,
    pub details: ProfileDetails,
}

impl ProfileUpdate {
    /// Overwrite the editable fields of `profile`, trimming blank details.
    pub fn apply_to(self, profile: &mut UserProfile) {
        profile.name = self.name;
        profile.avatar = self.avatar;
        profile.skills_offered = self.skills_offered;
        profile.skills_wanted = self.skills_wanted;
        profile.availability = self.availability;
        profile.is_public = self.is_public;
        profile.details = self.details.normalised();
    }
}

/// Directory use-cases consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Look a profile up by id; private profiles are returned too.
    async fn get_by_id(&self, id: &UserId) -> Result<UserProfile, SwapError>;

    /// Public profiles matching `query`, in directory order.
    async fn list(&self, query: &DirectoryQuery) -> Result<Vec<UserProfile>, SwapError>;

    /// Store a complete profile record, inserting or replacing by id.
    async fn upsert(&self, profile: UserProfile) -> Result<UserProfile, SwapError>;

    /// Apply an owner's edit to their own profile.
    async fn update_profile(
        &self,
        actor: &UserId,
        update: ProfileUpdate,
    ) -> Result<UserProfile, SwapError>;
}
