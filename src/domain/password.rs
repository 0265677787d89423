//! Password value object - hashed credential handling.
//!
//! New hashes are always Argon2id. Bcrypt hashes written by earlier
//! tooling are recognized and verified, never produced.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::errors::{AppError, AppResult};

/// Hash algorithm families recognized in stored credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashScheme {
    Argon2,
    Bcrypt,
}

impl HashScheme {
    /// Detect the scheme from a stored value's prefix.
    pub fn detect(stored: &str) -> Option<Self> {
        if stored.starts_with("$argon2") {
            Some(HashScheme::Argon2)
        } else if ["$2a$", "$2b$", "$2y$"].iter().any(|p| stored.starts_with(p)) {
            Some(HashScheme::Bcrypt)
        } else {
            None
        }
    }
}

/// Salted one-way password hash in PHC / modular-crypt form.
#[derive(Clone)]
pub struct Password {
    scheme: HashScheme,
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("scheme", &self.scheme)
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain-text password with Argon2id and a fresh salt.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;

        Ok(Self {
            scheme: HashScheme::Argon2,
            hash: hash.to_string(),
        })
    }

    /// Wrap a stored hash. Hands the value back when no known scheme prefix matches.
    pub fn from_hash(hash: String) -> Result<Self, String> {
        match HashScheme::detect(&hash) {
            Some(scheme) => Ok(Self { scheme, hash }),
            None => Err(hash),
        }
    }

    pub fn scheme(&self) -> HashScheme {
        self.scheme
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash (constant time).
    ///
    /// Malformed hashes never verify.
    pub fn verify(&self, plain_text: &str) -> bool {
        match self.scheme {
            HashScheme::Argon2 => PasswordHash::new(&self.hash)
                .map(|parsed| {
                    Self::argon2()
                        .verify_password(plain_text.as_bytes(), &parsed)
                        .is_ok()
                })
                .unwrap_or(false),
            HashScheme::Bcrypt => bcrypt::verify(plain_text, &self.hash).unwrap_or(false),
        }
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}
