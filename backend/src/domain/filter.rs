//! Directory matching rules.
//!
//! Pure functions over a snapshot of profiles. Filters compose with logical
//! AND, no filter means "match all", and output order follows input order.

use super::{AvailabilitySlot, UserProfile};

/// Narrowing criteria for a directory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryQuery {
    search_term: Option<String>,
    skill_filter: Option<String>,
    availability_filter: Option<AvailabilitySlot>,
}

fn normalise(term: Option<String>) -> Option<String> {
    term.map(|raw| raw.trim().to_lowercase())
        .filter(|lowered| !lowered.is_empty())
}

impl DirectoryQuery {
    /// Build a query; blank terms are treated as absent.
    ///
    /// # Examples
    /// ```
    /// use skillswap::domain::DirectoryQuery;
    ///
    /// let query = DirectoryQuery::new(Some("  ".into()), Some("PYTHON".into()), None);
    /// assert!(query.search_term().is_none());
    /// assert_eq!(query.skill_filter(), Some("python"));
    /// ```
    pub fn new(
        search_term: Option<String>,
        skill_filter: Option<String>,
        availability_filter: Option<AvailabilitySlot>,
    ) -> Self {
        Self {
            search_term: normalise(search_term),
            skill_filter: normalise(skill_filter),
            availability_filter,
        }
    }

    /// Lower-cased search term, if any.
    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    /// Lower-cased skill filter, if any.
    pub fn skill_filter(&self) -> Option<&str> {
        self.skill_filter.as_deref()
    }

    pub fn availability_filter(&self) -> Option<AvailabilitySlot> {
        self.availability_filter
    }

    /// Whether `profile` satisfies every present criterion.
    ///
    /// Visibility is not considered here; see [`filter_profiles`].
    pub fn matches(&self, profile: &UserProfile) -> bool {
        let search_ok = self.search_term().is_none_or(|term| {
            profile.name.as_ref().to_lowercase().contains(term)
                || profile.skills_offered.any_contains(term)
                || profile.skills_wanted.any_contains(term)
        });
        let skill_ok = self
            .skill_filter()
            .is_none_or(|skill| profile.skills_offered.any_contains(skill));
        let slot_ok = self
            .availability_filter
            .is_none_or(|slot| profile.availability.contains(&slot));
        search_ok && skill_ok && slot_ok
    }
}

/// Keep the public profiles matching `query`, preserving order.
pub fn filter_profiles(profiles: Vec<UserProfile>, query: &DirectoryQuery) -> Vec<UserProfile> {
    profiles
        .into_iter()
        .filter(|profile| profile.is_public && query.matches(profile))
        .collect()
}
