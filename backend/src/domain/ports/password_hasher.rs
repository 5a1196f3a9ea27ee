//! Port for turning plaintext passwords into digests and checking them.

use super::{PasswordDigest, define_port_error};

define_port_error! {
    /// Errors raised by password hashers.
    pub enum PasswordHasherError {
        /// The stored digest is not in the expected encoding.
        MalformedDigest { message: String } =>
            "stored password digest is malformed: {message}",
        /// The hasher could not produce a digest.
        Hashing { message: String } =>
            "password hashing failed: {message}",
    }
}

/// Credential verification collaborator.
///
/// Synchronous: hashing is CPU-bound and does no I/O.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh salt.
    fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHasherError>;

    /// Check `password` against a stored digest.
    fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool, PasswordHasherError>;
}
