//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed marketplace model (profiles, swap
//! requests, feedback) and the services that enforce its rules. Inbound
//! adapters talk to the services through the driving ports in [`ports`];
//! storage lives behind the driven ports.
//!
//! Public surface:
//! - [`UserProfile`], [`SwapRequest`], [`Feedback`] and their value types.
//! - [`SwapError`]: the core failure taxonomy returned by every service.
//! - [`Error`]/[`ErrorCode`]: the transport-facing error payload.
//! - Services: [`UserDirectoryService`], [`RequestLedgerService`],
//!   [`FeedbackService`], [`AdminService`], [`AccountServiceImpl`].

pub mod ports;

mod account_service;
mod admin;
mod admin_service;
mod auth;
mod availability;
mod directory_service;
mod email;
mod error;
mod feedback;
mod feedback_service;
mod filter;
mod ledger_service;
mod profile;
mod skill;
mod swap_error;
mod swap_request;
mod trace_id;
mod user;

pub use self::account_service::{AccountServiceImpl, DEFAULT_EXPERIENCE};
pub use self::admin::{AdminPolicy, AdminStats};
pub use self::admin_service::AdminService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, NewPassword, PASSWORD_MIN_CHARS,
    PasswordValidationError, SignupRequest,
};
pub use self::availability::{AvailabilitySlot, ParseAvailabilitySlotError};
pub use self::directory_service::UserDirectoryService;
pub use self::email::{EmailAddress, EmailValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::feedback::{COMMENT_MAX_CHARS, Feedback, FeedbackId, FeedbackScore, FeedbackScoreError};
pub use self::feedback_service::FeedbackService;
pub use self::filter::{DirectoryQuery, filter_profiles};
pub use self::ledger_service::RequestLedgerService;
pub use self::profile::{
    ProfileDetails, RATING_MAX, Rating, RatingValidationError, Role, UserProfile,
};
pub use self::skill::{SKILL_MAX_CHARS, Skill, SkillSet, SkillValidationError};
pub use self::swap_error::{StoreError, SwapError};
pub use self::swap_request::{
    MESSAGE_MAX_CHARS, ParticipantRole, SwapRequest, SwapRequestDraft, SwapRequestId, SwapStatus,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{DISPLAY_NAME_MAX, DisplayName, UserId, UserValidationError};
