//! Stored credential classification, verification and lazy migration.
//!
//! The `users.password` column holds either a hash (Argon2 or bcrypt) or a
//! legacy plaintext value. It is parsed once into [`Credential`] when a row
//! leaves the store; legacy values are upgraded the first time their owner
//! authenticates successfully.

use super::password::Password;
use crate::errors::AppResult;

/// A user's stored credential.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Legacy value stored without hashing
    Plaintext(String),
    /// Salted one-way hash
    Hashed(Password),
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Plaintext(_) => f.write_str("Plaintext([REDACTED])"),
            Credential::Hashed(password) => f.debug_tuple("Hashed").field(password).finish(),
        }
    }
}

/// Outcome of checking a candidate against a stored credential.
#[derive(Debug)]
pub struct Verification {
    pub valid: bool,
    /// Replacement hash to persist. Only set for a matching legacy plaintext.
    pub migrated: Option<Password>,
}

impl Credential {
    /// Classify a raw stored value.
    pub fn parse(stored: String) -> Self {
        match Password::from_hash(stored) {
            Ok(password) => Credential::Hashed(password),
            Err(legacy) => Credential::Plaintext(legacy),
        }
    }

    /// True for an empty legacy value, which can never authenticate.
    pub fn is_empty(&self) -> bool {
        matches!(self, Credential::Plaintext(value) if value.is_empty())
    }

    pub fn is_hashed(&self) -> bool {
        matches!(self, Credential::Hashed(_))
    }

    /// Check `candidate` and, for a matching legacy value, hash it for migration.
    ///
    /// Hashed credentials are never re-hashed.
    pub fn verify(&self, candidate: &str) -> AppResult<Verification> {
        match self {
            Credential::Hashed(password) => Ok(Verification {
                valid: password.verify(candidate),
                migrated: None,
            }),
            Credential::Plaintext(stored) => {
                if !stored.is_empty() && stored == candidate {
                    Ok(Verification {
                        valid: true,
                        migrated: Some(Password::new(candidate)?),
                    })
                } else {
                    Ok(Verification {
                        valid: false,
                        migrated: None,
                    })
                }
            }
        }
    }

    /// Whether `candidate` equals the current password, by whichever
    /// comparison the stored form allows.
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            Credential::Hashed(password) => password.verify(candidate),
            Credential::Plaintext(stored) => stored == candidate,
        }
    }

    /// Raw column value, used to make later writes conditional on it.
    pub fn as_stored(&self) -> &str {
        match self {
            Credential::Plaintext(value) => value,
            Credential::Hashed(password) => password.as_str(),
        }
    }

    /// Value to write back to the `password` column.
    pub fn into_stored(self) -> String {
        match self {
            Credential::Plaintext(value) => value,
            Credential::Hashed(password) => password.into_string(),
        }
    }
}

impl From<Password> for Credential {
    fn from(password: Password) -> Self {
        Credential::Hashed(password)
    }
}
