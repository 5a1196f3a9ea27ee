//! Outbound adapters implementing domain ports.
//!
//! - **memory**: in-process stores for profiles, requests, feedback and
//!   credentials.
//! - **password**: Argon2id password hashing.
//! - **events**: swap event publishing to the structured log.
//!
//! Adapters are thin translators between domain types and their storage
//! representation. They contain no business logic.

pub mod events;
pub mod memory;
pub mod password;
