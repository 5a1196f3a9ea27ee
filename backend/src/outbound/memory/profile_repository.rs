//! In-memory `ProfileRepository` adapter.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError, ProfileUpdate};
use crate::domain::{EmailAddress, Rating, UserId, UserProfile};

/// Profile store keeping records in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<Vec<UserProfile>>,
}

impl InMemoryProfileRepository {
    /// Start from an existing set of profiles, kept in the given order.
    ///
    /// Uniqueness is not re-checked; callers seed from trusted data.
    pub fn with_profiles(profiles: Vec<UserProfile>) -> Self {
        Self {
            profiles: RwLock::new(profiles),
        }
    }
}

fn email_taken_by_other(profiles: &[UserProfile], candidate: &UserProfile) -> bool {
    profiles
        .iter()
        .any(|existing| existing.email == candidate.email && existing.id != candidate.id)
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_id(
        &self,
        id: &UserId,
    ) -> Result<Option<UserProfile>, ProfileRepositoryError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.iter().find(|profile| &profile.id == id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserProfile>, ProfileRepositoryError> {
        let profiles = self.profiles.read().await;
        Ok(profiles
            .iter()
            .find(|profile| &profile.email == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<UserProfile>, ProfileRepositoryError> {
        Ok(self.profiles.read().await.clone())
    }

    async fn insert(&self, profile: &UserProfile) -> Result<(), ProfileRepositoryError> {
        let mut profiles = self.profiles.write().await;
        if profiles.iter().any(|existing| existing.id == profile.id) {
            return Err(ProfileRepositoryError::duplicate_id(profile.id.to_string()));
        }
        if email_taken_by_other(&profiles, profile) {
            return Err(ProfileRepositoryError::duplicate_email(
                profile.email.to_string(),
            ));
        }
        profiles.push(profile.clone());
        Ok(())
    }

    async fn upsert(&self, profile: &UserProfile) -> Result<(), ProfileRepositoryError> {
        let mut profiles = self.profiles.write().await;
        if email_taken_by_other(&profiles, profile) {
            return Err(ProfileRepositoryError::duplicate_email(
                profile.email.to_string(),
            ));
        }
        match profiles.iter_mut().find(|existing| existing.id == profile.id) {
            Some(slot) => *slot = profile.clone(),
            None => profiles.push(profile.clone()),
        }
        Ok(())
    }

    async fn apply_update(
        &self,
        id: &UserId,
        update: ProfileUpdate,
    ) -> Result<Option<UserProfile>, ProfileRepositoryError> {
        let mut profiles = self.profiles.write().await;
        Ok(profiles
            .iter_mut()
            .find(|profile| &profile.id == id)
            .map(|slot| {
                update.apply_to(slot);
                slot.clone()
            }))
    }

    async fn record_rating(
        &self,
        id: &UserId,
        score: u8,
    ) -> Result<Option<Rating>, ProfileRepositoryError> {
        let mut profiles = self.profiles.write().await;
        Ok(profiles
            .iter_mut()
            .find(|profile| &profile.id == id)
            .map(|slot| {
                slot.rating = slot.rating.record(score);
                slot.rating
            }))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, ProfileRepositoryError> {
        let mut profiles = self.profiles.write().await;
        let before = profiles.len();
        profiles.retain(|profile| &profile.id != id);
        Ok(profiles.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::profile;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn upsert_replaces_in_place_and_keeps_order() {
        let first = profile("First Person", &["Go"], &[]);
        let second = profile("Second Person", &["Rust"], &[]);
        let repo = InMemoryProfileRepository::with_profiles(vec![first.clone(), second.clone()]);

        let mut renamed = first.clone();
        renamed.is_public = false;
        repo.upsert(&renamed).await.expect("upsert");

        let all = repo.list_all().await.expect("list");
        assert_eq!(all, vec![renamed, second]);
    }

    #[rstest]
    #[tokio::test]
    async fn insert_rejects_duplicate_ids_and_emails() {
        let first = profile("First Person", &["Go"], &[]);
        let repo = InMemoryProfileRepository::default();
        repo.insert(&first).await.expect("insert");

        let err = repo.insert(&first).await.expect_err("same id");
        assert!(matches!(err, ProfileRepositoryError::DuplicateId { .. }));

        let mut clone = profile("First Person", &[], &[]);
        clone.id = UserId::random();
        let err = repo.insert(&clone).await.expect_err("same email");
        assert!(matches!(err, ProfileRepositoryError::DuplicateEmail { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn upsert_refuses_to_steal_another_email() {
        let first = profile("First Person", &[], &[]);
        let mut second = profile("Second Person", &[], &[]);
        let repo = InMemoryProfileRepository::with_profiles(vec![first.clone(), second.clone()]);

        second.email = first.email.clone();
        let err = repo.upsert(&second).await.expect_err("email clash");
        assert!(matches!(err, ProfileRepositoryError::DuplicateEmail { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn edits_keep_the_stored_rating() {
        let person = profile("Rated Person", &["Go"], &[]);
        let repo = InMemoryProfileRepository::with_profiles(vec![person.clone()]);

        let rating = repo
            .record_rating(&person.id, 4)
            .await
            .expect("record")
            .expect("present");
        assert_eq!(rating.total_ratings(), 1);

        let update = ProfileUpdate {
            name: person.name.clone(),
            avatar: None,
            skills_offered: person.skills_offered.clone(),
            skills_wanted: person.skills_wanted.clone(),
            availability: person.availability.clone(),
            is_public: false,
            details: person.details.clone(),
        };
        let stored = repo
            .apply_update(&person.id, update)
            .await
            .expect("update")
            .expect("present");
        assert!(!stored.is_public);
        assert_eq!(stored.rating, rating);
    }

    #[rstest]
    #[tokio::test]
    async fn rating_unknown_profiles_reports_absence() {
        let repo = InMemoryProfileRepository::default();
        assert_eq!(
            repo.record_rating(&UserId::random(), 5).await.expect("record"),
            None
        );
    }

    #[rstest]
    #[tokio::test]
    async fn lookups_by_email_and_delete() {
        let person = profile("Mixed Case", &[], &[]);
        let repo = InMemoryProfileRepository::with_profiles(vec![person.clone()]);
        let email = EmailAddress::new("MIXED.case@Example.com").expect("email");

        assert_eq!(repo.find_by_email(&email).await.expect("find"), Some(person.clone()));
        assert!(repo.delete(&person.id).await.expect("delete"));
        assert!(!repo.delete(&person.id).await.expect("second delete"));
        assert_eq!(repo.find_by_id(&person.id).await.expect("find"), None);
    }
}
