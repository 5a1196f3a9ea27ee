//! In-process stores backing the driven ports.
//!
//! Each store keeps its records in insertion order behind a
//! [`tokio::sync::RwLock`]. Reads clone a snapshot; writes hold the write
//! lock for the whole check-then-write so compare-and-set and uniqueness
//! checks are atomic with respect to other writers.

mod credential_store;
mod feedback_repository;
mod profile_repository;
mod swap_request_repository;

pub use credential_store::InMemoryCredentialStore;
pub use feedback_repository::InMemoryFeedbackRepository;
pub use profile_repository::InMemoryProfileRepository;
pub use swap_request_repository::InMemorySwapRequestRepository;
