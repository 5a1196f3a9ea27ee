//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Digests are stored as PHC strings (`$argon2id$v=19$...`), so the salt and
//! cost parameters travel with each digest and older digests keep verifying
//! after the defaults change.

use argon2::password_hash::{self, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};
use rand::RngCore;

use crate::domain::ports::{PasswordDigest, PasswordHasher, PasswordHasherError};

/// Salt length in bytes before base64 encoding.
const SALT_BYTES: usize = 16;

#[derive(Debug, Default, Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHasherError> {
        let mut salt = [0_u8; SALT_BYTES];
        rand::thread_rng().fill_bytes(&mut salt);
        let salt = SaltString::encode_b64(&salt)
            .map_err(|err| PasswordHasherError::hashing(err.to_string()))?;
        let encoded = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordHasherError::hashing(err.to_string()))?;
        Ok(PasswordDigest::new(encoded.to_string()))
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool, PasswordHasherError> {
        let parsed = PasswordHash::new(digest.as_str())
            .map_err(|err| PasswordHasherError::malformed_digest(err.to_string()))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHasherError::malformed_digest(err.to_string())),
        }
    }
}
