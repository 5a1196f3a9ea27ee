//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`CredentialStore`], [`PasswordHasher`],
//! [`SwapEventPublisher`]) are implemented by outbound adapters. Driving
//! ports ([`UserDirectory`], [`RequestLedger`], [`FeedbackCommand`],
//! [`AdminQuery`], [`AccountService`]) are implemented by domain services and
//! consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod admin_query;
mod credential_store;
mod feedback_command;
mod feedback_repository;
mod password_hasher;
mod profile_repository;
mod request_ledger;
mod swap_event_publisher;
mod swap_request_repository;
mod user_directory;

pub use account_service::AccountService;
#[cfg(test)]
pub use account_service::MockAccountService;
pub use admin_query::AdminQuery;
#[cfg(test)]
pub use admin_query::MockAdminQuery;
#[cfg(test)]
pub use credential_store::MockCredentialStore;
pub use credential_store::{CredentialStore, CredentialStoreError, PasswordDigest};
#[cfg(test)]
pub use feedback_command::MockFeedbackCommand;
pub use feedback_command::{FeedbackCommand, SubmitFeedback};
#[cfg(test)]
pub use feedback_repository::MockFeedbackRepository;
pub use feedback_repository::{FeedbackRepository, FeedbackRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
#[cfg(test)]
pub use request_ledger::MockRequestLedger;
pub use request_ledger::{CreateSwapRequest, RequestLedger};
#[cfg(test)]
pub use swap_event_publisher::MockSwapEventPublisher;
pub use swap_event_publisher::{
    NoOpSwapEventPublisher, SwapEvent, SwapEventPublisher, SwapEventPublisherError,
};
#[cfg(test)]
pub use swap_request_repository::MockSwapRequestRepository;
pub use swap_request_repository::{SwapRequestRepository, SwapRequestRepositoryError};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{ProfileUpdate, UserDirectory};
