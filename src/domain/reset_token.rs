//! Password-reset token value objects.
//!
//! The caller receives a random secret; the store only ever sees its
//! SHA-256 digest.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};

use crate::config::{RESET_TOKEN_BYTES, RESET_TOKEN_LIFETIME_MINUTES};

/// Plaintext reset secret handed to the user inside the reset link.
#[derive(Clone, PartialEq, Eq)]
pub struct ResetSecret(String);

// Never print the secret itself
impl std::fmt::Debug for ResetSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ResetSecret([REDACTED])")
    }
}

impl ResetSecret {
    /// Fresh 256-bit secret from the OS CSPRNG, hex encoded.
    pub fn generate() -> Self {
        let mut bytes = [0u8; RESET_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Digest stored in `password_reset_tokens.token_digest`.
    pub fn digest(&self) -> String {
        digest(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Hex SHA-256 of a presented token.
pub fn digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Expiry for a token issued at `issued_at`.
pub fn expiry_from(issued_at: DateTime<Utc>) -> DateTime<Utc> {
    issued_at + Duration::minutes(RESET_TOKEN_LIFETIME_MINUTES)
}

/// Persisted reset-token row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetToken {
    pub id: i32,
    pub user_id: i32,
    pub token_digest: String,
    pub used: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ResetToken {
    /// Unused and not yet expired at `now`.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        !self.used && self.expires_at > now
    }
}

/// A live token matched by digest, pending redemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetClaim {
    pub token_id: i32,
    pub user_id: i32,
}

/// Secret plus expiry returned when a token is issued.
#[derive(Debug, Clone)]
pub struct IssuedResetToken {
    pub secret: ResetSecret,
    pub expires_at: DateTime<Utc>,
}
