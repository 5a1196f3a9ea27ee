//! User profile aggregate.
//!
//! A profile is created once at signup. Afterwards its owner edits the
//! fields in `ProfileUpdate` and feedback moves its `rating`; the profile
//! store applies both in place, so neither overwrites the other.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::{AvailabilitySlot, DisplayName, EmailAddress, SkillSet, UserId};

/// Highest rating a user can hold.
pub const RATING_MAX: f64 = 5.0;

/// Errors raised when constructing a [`Rating`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RatingValidationError {
    #[error("rating must be between 0 and {max}, got {actual}")]
    OutOfRange { max: f64, actual: f64 },
}

/// Aggregate rating for a profile.
///
/// ## Invariants
/// - `rating` lies in `[0, 5]` and is finite.
/// - `rating` is only meaningful when `total_ratings > 0`; use
///   [`Rating::average`] to read it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "RatingDto")]
pub struct Rating {
    rating: f64,
    total_ratings: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RatingDto {
    rating: f64,
    total_ratings: u32,
}

impl TryFrom<RatingDto> for Rating {
    type Error = RatingValidationError;

    fn try_from(value: RatingDto) -> Result<Self, Self::Error> {
        Self::new(value.rating, value.total_ratings)
    }
}

impl Rating {
    /// Validate a rating value and its contributing count.
    pub fn new(rating: f64, total_ratings: u32) -> Result<Self, RatingValidationError> {
        if !rating.is_finite() || !(0.0..=RATING_MAX).contains(&rating) {
            return Err(RatingValidationError::OutOfRange {
                max: RATING_MAX,
                actual: rating,
            });
        }
        Ok(Self {
            rating,
            total_ratings,
        })
    }

    /// Rating with no contributions yet.
    pub const fn unrated() -> Self {
        Self {
            rating: 0.0,
            total_ratings: 0,
        }
    }

    /// Mean score, or `None` when nobody has rated this user.
    pub fn average(&self) -> Option<f64> {
        (self.total_ratings > 0).then_some(self.rating)
    }

    /// Raw stored value regardless of count.
    pub fn raw(&self) -> f64 {
        self.rating
    }

    pub fn total_ratings(&self) -> u32 {
        self.total_ratings
    }

    /// Fold one more score into the running mean.
    ///
    /// # Examples
    /// ```
    /// use skillswap::domain::Rating;
    ///
    /// let rating = Rating::new(4.0, 1).unwrap().record(5);
    /// assert_eq!(rating.average(), Some(4.5));
    /// assert_eq!(rating.total_ratings(), 2);
    /// ```
    #[must_use]
    pub fn record(self, score: u8) -> Self {
        let previous = f64::from(self.total_ratings);
        let total = self.total_ratings.saturating_add(1);
        let mean = (self.rating * previous + f64::from(score)) / f64::from(total);
        Self {
            rating: mean.clamp(0.0, RATING_MAX),
            total_ratings: total,
        }
    }
}

/// Authorisation role attached to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Member,
    Admin,
}

/// Optional descriptive fields with no behavioural constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
}

impl ProfileDetails {
    /// Drop fields that are blank once trimmed.
    #[must_use]
    pub fn normalised(self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value
                .map(|raw| raw.trim().to_owned())
                .filter(|trimmed| !trimmed.is_empty())
        }
        Self {
            location: keep(self.location),
            bio: keep(self.bio),
            phone: keep(self.phone),
            website: keep(self.website),
            experience: keep(self.experience),
        }
    }
}

/// A marketplace member as stored in the user directory.
///
/// ## Invariants
/// - `id`, `email` and `join_date` never change after creation.
/// - `skills_offered` and `skills_wanted` hold no case-insensitive duplicates.
/// - non-public profiles are hidden from directory listings but remain
///   reachable by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserId,
    #[schema(value_type = String, example = "Sarah Chen")]
    pub name: DisplayName,
    #[schema(value_type = String, example = "sarah@example.com")]
    pub email: EmailAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[schema(value_type = Vec<String>)]
    pub skills_offered: SkillSet,
    #[schema(value_type = Vec<String>)]
    pub skills_wanted: SkillSet,
    #[schema(value_type = Vec<AvailabilitySlot>)]
    pub availability: BTreeSet<AvailabilitySlot>,
    #[serde(flatten)]
    pub rating: Rating,
    pub is_public: bool,
    #[schema(value_type = String, format = Date)]
    pub join_date: NaiveDate,
    #[serde(default)]
    pub role: Role,
    #[serde(flatten)]
    pub details: ProfileDetails,
}

impl UserProfile {
    /// Whether `user_id` owns this profile.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.id == user_id
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-0.1)]
    #[case(5.01)]
    #[case(f64::NAN)]
    fn ratings_outside_range_are_rejected(#[case] value: f64) {
        assert!(Rating::new(value, 3).is_err());
    }

    #[rstest]
    fn unrated_profiles_have_no_average() {
        assert_eq!(Rating::unrated().average(), None);
        assert_eq!(Rating::unrated().record(3).average(), Some(3.0));
    }

    #[rstest]
    fn running_mean_weights_previous_ratings() {
        let rating = Rating::new(4.0, 3).expect("valid").record(2);
        assert_eq!(rating.total_ratings(), 4);
        assert_eq!(rating.average(), Some(3.5));
    }

    #[rstest]
    fn blank_details_are_dropped() {
        let details = ProfileDetails {
            location: Some("  ".to_owned()),
            bio: Some(" Teaches guitar ".to_owned()),
            ..ProfileDetails::default()
        }
        .normalised();
        assert_eq!(details.location, None);
        assert_eq!(details.bio.as_deref(), Some("Teaches guitar"));
    }

    #[rstest]
    fn profile_json_uses_flat_camel_case_fields() {
        let json = serde_json::json!({
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "name": "Sarah Chen",
            "email": "sarah@example.com",
            "skillsOffered": ["React", "react"],
            "skillsWanted": ["Python"],
            "availability": ["Weekends", "Weekday Evenings"],
            "rating": 4.8,
            "totalRatings": 24,
            "isPublic": true,
            "joinDate": "2024-01-15",
            "location": "San Francisco, CA"
        });
        let profile: UserProfile = serde_json::from_value(json).expect("deserialise");
        assert_eq!(profile.skills_offered.len(), 1);
        assert_eq!(profile.rating.average(), Some(4.8));
        assert_eq!(profile.role, Role::Member);
        assert_eq!(profile.details.location.as_deref(), Some("San Francisco, CA"));

        let back = serde_json::to_value(&profile).expect("serialise");
        assert_eq!(back.get("totalRatings"), Some(&serde_json::json!(24)));
        assert_eq!(back.get("role"), Some(&serde_json::json!("member")));
    }
}
