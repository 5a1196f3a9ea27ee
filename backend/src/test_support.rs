//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`, via
//! the `test-support` feature). Builders panic on invalid fixtures.

use std::collections::BTreeSet;
use std::sync::Mutex;

use chrono::{DateTime, Local, NaiveDate, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    DisplayName, EmailAddress, ProfileDetails, Rating, Role, Skill, SkillSet, SwapRequest,
    SwapRequestDraft, SwapRequestId, SwapStatus, UserId, UserProfile,
};

/// Clock double whose time only moves when told to.
#[derive(Debug)]
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// A fixed instant used as "now" across tests.
pub fn fixed_now() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).single() {
        Some(now) => now,
        None => panic!("fixed timestamp is valid"),
    }
}

/// Build a public member profile with the given skills.
///
/// The e-mail is derived from the name, so names must be distinct within a
/// store that enforces unique addresses.
pub fn profile(name: &str, offered: &[&str], wanted: &[&str]) -> UserProfile {
    let local_part = name.to_lowercase().replace(' ', ".");
    let email = match EmailAddress::new(format!("{local_part}@example.com")) {
        Ok(email) => email,
        Err(err) => panic!("fixture email for {name}: {err}"),
    };
    let join_date = match NaiveDate::from_ymd_opt(2024, 1, 15) {
        Some(date) => date,
        None => panic!("fixture join date is valid"),
    };
    UserProfile {
        id: UserId::random(),
        name: match DisplayName::new(name) {
            Ok(name) => name,
            Err(err) => panic!("fixture name: {err}"),
        },
        email,
        avatar: None,
        skills_offered: skills(offered),
        skills_wanted: skills(wanted),
        availability: BTreeSet::new(),
        rating: Rating::unrated(),
        is_public: true,
        join_date,
        role: Role::Member,
        details: ProfileDetails::default(),
    }
}

fn skills(labels: &[&str]) -> SkillSet {
    match SkillSet::parse(labels) {
        Ok(set) => set,
        Err(err) => panic!("fixture skills {labels:?}: {err}"),
    }
}

fn skill(label: &str) -> Skill {
    match Skill::new(label) {
        Ok(skill) => skill,
        Err(err) => panic!("fixture skill {label}: {err}"),
    }
}

/// Build a request between two fresh users, driven to `status` through the
/// state machine.
pub fn request_with_status(status: SwapStatus) -> SwapRequest {
    let sender = UserId::random();
    let recipient = UserId::random();
    let now = fixed_now();
    let pending = SwapRequest::open(
        SwapRequestId::random(),
        SwapRequestDraft {
            from_user_id: sender,
            to_user_id: recipient.clone(),
            offered_skill: skill("Guitar"),
            wanted_skill: skill("Spanish"),
            message: None,
        },
        now,
    );
    let path: &[SwapStatus] = match status {
        SwapStatus::Pending => &[],
        SwapStatus::Accepted => &[SwapStatus::Accepted],
        SwapStatus::Rejected => &[SwapStatus::Rejected],
        SwapStatus::Completed => &[SwapStatus::Accepted, SwapStatus::Completed],
    };
    path.iter().fold(pending, |request, next| {
        match request.transition(*next, &recipient, now) {
            Ok(moved) => moved,
            Err(err) => panic!("fixture transition to {next}: {err}"),
        }
    })
}
