//! Port for user profile storage.
//!
//! `upsert` replaces the stored profile wholesale. Edits and rating updates
//! that start from the stored record go through `apply_update` and
//! `record_rating`, which read and write under one store lock.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Rating, UserId, UserProfile};

use super::ProfileUpdate;

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "profile repository query failed: {message}",
        /// Another profile already uses this e-mail address.
        DuplicateEmail { email: String } =>
            "a profile with email {email} already exists",
        /// Another profile already uses this identifier.
        DuplicateId { id: String } =>
            "a profile with id {id} already exists",
    }
}

/// Port for reading and writing user profiles in insertion order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch a profile by id regardless of visibility.
    async fn find_by_id(&self, id: &UserId)
    -> Result<Option<UserProfile>, ProfileRepositoryError>;

    /// Fetch a profile by normalised e-mail address.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserProfile>, ProfileRepositoryError>;

    /// Snapshot every profile, public or not, in insertion order.
    async fn list_all(&self) -> Result<Vec<UserProfile>, ProfileRepositoryError>;

    /// Insert a new profile, rejecting duplicate ids and e-mail addresses.
    async fn insert(&self, profile: &UserProfile) -> Result<(), ProfileRepositoryError>;

    /// Replace the profile with the same id, or append it when absent.
    ///
    /// Fails with [`ProfileRepositoryError::DuplicateEmail`] when the e-mail
    /// belongs to a different profile.
    async fn upsert(&self, profile: &UserProfile) -> Result<(), ProfileRepositoryError>;

    /// Apply an owner edit to the stored record in one step.
    ///
    /// Returns the stored result, or `None` when no profile has this id.
    async fn apply_update(
        &self,
        id: &UserId,
        update: ProfileUpdate,
    ) -> Result<Option<UserProfile>, ProfileRepositoryError>;

    /// Fold `score` into the stored running mean in one step.
    ///
    /// Returns the new rating, or `None` when no profile has this id.
    async fn record_rating(
        &self,
        id: &UserId,
        score: u8,
    ) -> Result<Option<Rating>, ProfileRepositoryError>;

    /// Remove a profile; returns whether one was removed.
    async fn delete(&self, id: &UserId) -> Result<bool, ProfileRepositoryError>;
}
