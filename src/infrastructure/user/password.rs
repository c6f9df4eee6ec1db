//! Password hashing utilities using SHA-256
//!
//! The digest is `hex(sha256(password || secret))`. It is deterministic and
//! unsalted so that stored hashes stay compatible with existing accounts;
//! this is a compatibility format, not a recommendation.

use sha2::{Digest, Sha256};
use std::fmt::Debug;

/// Secret appended to every password when none is configured
pub const DEFAULT_PASSWORD_SECRET: &str = "keyboard_cat";

/// Trait for password hashing operations
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a password
    fn hash(&self, password: &str) -> String;

    /// Verify a password against a hash
    fn verify(&self, password: &str, hash: &str) -> bool {
        self.hash(password) == hash
    }
}

/// Compute the hex encoded digest of `password` peppered with `secret`
pub fn create_password_hash(password: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// SHA-256 hasher with a fixed server-side secret
#[derive(Clone)]
pub struct Sha256Hasher {
    secret: String,
}

impl Sha256Hasher {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl Default for Sha256Hasher {
    fn default() -> Self {
        Self::new(DEFAULT_PASSWORD_SECRET)
    }
}

impl Debug for Sha256Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sha256Hasher")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl PasswordHasher for Sha256Hasher {
    fn hash(&self, password: &str) -> String {
        create_password_hash(password, &self.secret)
    }
}
