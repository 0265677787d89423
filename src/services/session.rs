//! Session token issuing and verification.
//!
//! Tokens are HS256 JWTs carrying `{id, username, iat, exp}` with a fixed
//! lifetime. Verification allows no clock leeway.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SESSION_TOKEN_LIFETIME_HOURS;
use crate::errors::{AppError, AppResult};

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies session tokens with the server secret.
#[derive(Clone)]
pub struct SessionIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl SessionIssuer {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token valid for the session lifetime starting now.
    pub fn issue(&self, user_id: i32, username: &str) -> AppResult<String> {
        self.issue_at(user_id, username, Utc::now())
    }

    /// Issue a token as if at `issued_at`.
    pub fn issue_at(
        &self,
        user_id: i32,
        username: &str,
        issued_at: DateTime<Utc>,
    ) -> AppResult<String> {
        let claims = Claims {
            id: user_id,
            username: username.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::hours(SESSION_TOKEN_LIFETIME_HOURS)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))
    }

    /// Verify signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(token_data.claims)
    }
}
