//! Availability slots describing when a user is open to swapping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fixed vocabulary of availability labels.
///
/// Serialised with the human-readable labels so stored profiles and query
/// strings use the same spelling.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum AvailabilitySlot {
    #[serde(rename = "Weekday Mornings")]
    WeekdayMornings,
    #[serde(rename = "Weekday Afternoons")]
    WeekdayAfternoons,
    #[serde(rename = "Weekday Evenings")]
    WeekdayEvenings,
    #[serde(rename = "Weekend Mornings")]
    WeekendMornings,
    #[serde(rename = "Weekend Afternoons")]
    WeekendAfternoons,
    #[serde(rename = "Weekends")]
    Weekends,
    #[serde(rename = "24/7")]
    AroundTheClock,
}

impl AvailabilitySlot {
    /// Every slot, in display order.
    pub const ALL: [Self; 7] = [
        Self::WeekdayMornings,
        Self::WeekdayAfternoons,
        Self::WeekdayEvenings,
        Self::WeekendMornings,
        Self::WeekendAfternoons,
        Self::Weekends,
        Self::AroundTheClock,
    ];

    /// Label shown to users and accepted by [`FromStr`].
    pub const fn label(self) -> &'static str {
        match self {
            Self::WeekdayMornings => "Weekday Mornings",
            Self::WeekdayAfternoons => "Weekday Afternoons",
            Self::WeekdayEvenings => "Weekday Evenings",
            Self::WeekendMornings => "Weekend Mornings",
            Self::WeekendAfternoons => "Weekend Afternoons",
            Self::Weekends => "Weekends",
            Self::AroundTheClock => "24/7",
        }
    }
}

impl fmt::Display for AvailabilitySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a label is not part of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAvailabilitySlotError(pub String);

impl fmt::Display for ParseAvailabilitySlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown availability slot: {}", self.0)
    }
}

impl std::error::Error for ParseAvailabilitySlotError {}

impl FromStr for AvailabilitySlot {
    type Err = ParseAvailabilitySlotError;

    /// Labels must match exactly; the filter engine compares exact slots.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.label() == value)
            .ok_or_else(|| ParseAvailabilitySlotError(value.to_owned()))
    }
}
