//! Skill labels and ordered skill lists.
//!
//! Skills are free text; no controlled vocabulary is enforced. Lists keep the
//! order the owner entered them in but collapse case-insensitive duplicates,
//! keeping the first spelling.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of characters in a single skill label.
pub const SKILL_MAX_CHARS: usize = 64;

/// Validation errors for skill labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkillValidationError {
    #[error("skill must not be empty")]
    Empty,
    #[error("skill must be at most {max} characters")]
    TooLong { max: usize },
}

/// A single skill label, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Skill(String);

impl Skill {
    /// Validate and construct a skill label.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, SkillValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SkillValidationError::Empty);
        }
        if trimmed.chars().count() > SKILL_MAX_CHARS {
            return Err(SkillValidationError::TooLong {
                max: SKILL_MAX_CHARS,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Case-insensitive equality used for membership checks.
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.trim().to_lowercase()
    }

    /// Case-insensitive substring test used by directory search.
    pub fn contains_ignore_case(&self, needle_lowercase: &str) -> bool {
        self.0.to_lowercase().contains(needle_lowercase)
    }
}

impl AsRef<str> for Skill {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Skill> for String {
    fn from(value: Skill) -> Self {
        value.0
    }
}

impl TryFrom<String> for Skill {
    type Error = SkillValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Ordered, duplicate-free list of skills.
///
/// # Examples
/// ```
/// use skillswap::domain::SkillSet;
///
/// let skills = SkillSet::parse(["React", "react", "Python"]).unwrap();
/// let labels: Vec<&str> = skills.iter().map(AsRef::as_ref).collect();
/// assert_eq!(labels, ["React", "Python"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SkillSet(Vec<Skill>);

impl SkillSet {
    /// Build a set from already validated skills, dropping duplicates.
    pub fn from_skills(skills: impl IntoIterator<Item = Skill>) -> Self {
        let mut unique: Vec<Skill> = Vec::new();
        for skill in skills {
            if !unique.iter().any(|seen| seen.eq_ignore_case(skill.as_ref())) {
                unique.push(skill);
            }
        }
        Self(unique)
    }

    /// Validate raw labels and build a set, dropping duplicates.
    pub fn parse<I, S>(raw: I) -> Result<Self, SkillValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let skills = raw
            .into_iter()
            .map(Skill::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_skills(skills))
    }

    /// Return the stored spelling of `label` when present (case-insensitive).
    pub fn find(&self, label: &str) -> Option<&Skill> {
        self.0.iter().find(|skill| skill.eq_ignore_case(label))
    }

    /// Whether the set contains `label` (case-insensitive).
    pub fn contains(&self, label: &str) -> bool {
        self.find(label).is_some()
    }

    /// Whether any skill contains `needle_lowercase` as a substring.
    pub fn any_contains(&self, needle_lowercase: &str) -> bool {
        self.0
            .iter()
            .any(|skill| skill.contains_ignore_case(needle_lowercase))
    }

    /// Iterate in stored order.
    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<SkillSet> for Vec<String> {
    fn from(value: SkillSet) -> Self {
        value.0.into_iter().map(String::from).collect()
    }
}

impl TryFrom<Vec<String>> for SkillSet {
    type Error = SkillValidationError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
