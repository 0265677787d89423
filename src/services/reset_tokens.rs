//! Reset token lifecycle: issue, look up, redeem.

use chrono::Utc;
use std::sync::Arc;

use crate::domain::reset_token::{self, IssuedResetToken, ResetClaim, ResetSecret};
use crate::domain::Password;
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Generates, stores (digest only), validates and single-uses reset tokens.
pub struct ResetTokenManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ResetTokenManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Issue a new token for `user_id`, replacing any earlier one.
    pub async fn create(&self, user_id: i32) -> AppResult<IssuedResetToken> {
        let secret = ResetSecret::generate();
        let now = Utc::now();
        let expires_at = reset_token::expiry_from(now);

        self.uow
            .reset_tokens()
            .replace_for_user(user_id, secret.digest(), now, expires_at)
            .await?;

        Ok(IssuedResetToken { secret, expires_at })
    }

    /// Resolve a presented token to its live claim.
    ///
    /// Unknown, expired and already used tokens are indistinguishable.
    pub async fn lookup(&self, presented: &str) -> AppResult<ResetClaim> {
        let token = self
            .uow
            .reset_tokens()
            .find_live_by_digest(&reset_token::digest(presented), Utc::now())
            .await?
            .ok_or(AppError::InvalidResetToken)?;

        Ok(ResetClaim {
            token_id: token.id,
            user_id: token.user_id,
        })
    }

    /// Mark the claim used and store `password` as one unit, provided the
    /// user's credential is still `expected`.
    ///
    /// Fails with `InvalidResetToken` if another request consumed the token
    /// first, it expired since lookup, or the credential was changed.
    pub async fn consume(
        &self,
        claim: ResetClaim,
        expected: String,
        password: Password,
    ) -> AppResult<()> {
        let redeemed = self
            .uow
            .reset_tokens()
            .redeem(claim, expected, password, Utc::now())
            .await?;

        if redeemed {
            Ok(())
        } else {
            Err(AppError::InvalidResetToken)
        }
    }
}
