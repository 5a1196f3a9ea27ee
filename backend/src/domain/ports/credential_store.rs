//! Port for stored password digests.
//!
//! The store only ever sees hashed credentials produced by a
//! [`PasswordHasher`](super::PasswordHasher).

use async_trait::async_trait;

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential store adapters.
    pub enum CredentialStoreError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "credential store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "credential store query failed: {message}",
    }
}

/// An opaque password digest as produced by the hasher.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// Port mapping users to their password digest.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Store or replace the digest for `user_id`.
    async fn save(
        &self,
        user_id: &UserId,
        digest: &PasswordDigest,
    ) -> Result<(), CredentialStoreError>;

    async fn find(&self, user_id: &UserId) -> Result<Option<PasswordDigest>, CredentialStoreError>;
}
