//! Password reset token repository.
//!
//! Issuing replaces every prior token of the user in one transaction.
//! Redemption claims the token with a conditional update and writes the new
//! password in the same transaction, so at most one concurrent caller wins.
//! The password write is itself conditional on the credential the caller
//! checked for reuse; if another writer changed it, the claim is rolled back.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, Set, TransactionTrait,
};

use super::entities::password_reset_token::{self, ActiveModel, Entity as TokenEntity};
use super::entities::user::{self, Entity as UserEntity};
use crate::domain::{Password, ResetClaim, ResetToken};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Reset token repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ResetTokenRepository: Send + Sync {
    /// Atomically delete the user's existing tokens and insert a new one
    async fn replace_for_user(
        &self,
        user_id: i32,
        token_digest: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> AppResult<ResetToken>;

    /// Find an unused, unexpired token by digest
    async fn find_live_by_digest(
        &self,
        token_digest: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ResetToken>>;

    /// Mark the token used and store the new password as one unit.
    ///
    /// `expected` is the stored credential the caller compared against.
    /// Returns `false` when the token was no longer live or the credential
    /// changed since; nothing is written then.
    async fn redeem(
        &self,
        claim: ResetClaim,
        expected: String,
        password: Password,
        now: DateTime<Utc>,
    ) -> AppResult<bool>;
}

/// Concrete implementation of ResetTokenRepository
pub struct ResetTokenStore {
    db: DatabaseConnection,
}

impl ResetTokenStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn rollback(txn: DatabaseTransaction) {
        if let Err(rollback_err) = txn.rollback().await {
            tracing::error!("Transaction rollback failed: {}", rollback_err);
        }
    }
}

#[async_trait]
impl ResetTokenRepository for ResetTokenStore {
    async fn replace_for_user(
        &self,
        user_id: i32,
        token_digest: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> AppResult<ResetToken> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let result = async {
            TokenEntity::delete_many()
                .filter(password_reset_token::Column::UserId.eq(user_id))
                .exec(&txn)
                .await?;

            ActiveModel {
                user_id: Set(user_id),
                token_digest: Set(token_digest),
                used: Set(false),
                created_at: Set(created_at),
                expires_at: Set(expires_at),
                ..Default::default()
            }
            .insert(&txn)
            .await
        }
        .await;

        match result {
            Ok(model) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(ResetToken::from(model))
            }
            Err(e) => {
                Self::rollback(txn).await;
                Err(AppError::from(e))
            }
        }
    }

    async fn find_live_by_digest(
        &self,
        token_digest: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ResetToken>> {
        let result = TokenEntity::find()
            .filter(password_reset_token::Column::TokenDigest.eq(token_digest))
            .filter(password_reset_token::Column::Used.eq(false))
            .filter(password_reset_token::Column::ExpiresAt.gt(now))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(ResetToken::from))
    }

    async fn redeem(
        &self,
        claim: ResetClaim,
        expected: String,
        password: Password,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let claimed = TokenEntity::update_many()
            .col_expr(password_reset_token::Column::Used, Expr::value(true))
            .filter(password_reset_token::Column::Id.eq(claim.token_id))
            .filter(password_reset_token::Column::UserId.eq(claim.user_id))
            .filter(password_reset_token::Column::Used.eq(false))
            .filter(password_reset_token::Column::ExpiresAt.gt(now))
            .exec(&txn)
            .await;

        let claimed = match claimed {
            Ok(result) => result.rows_affected,
            Err(e) => {
                Self::rollback(txn).await;
                return Err(AppError::from(e));
            }
        };

        if claimed == 0 {
            Self::rollback(txn).await;
            return Ok(false);
        }

        let updated = UserEntity::update_many()
            .col_expr(user::Column::Password, Expr::value(password.into_string()))
            .filter(user::Column::Id.eq(claim.user_id))
            .filter(user::Column::Password.eq(expected))
            .exec(&txn)
            .await;

        match updated {
            Ok(result) if result.rows_affected == 1 => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(true)
            }
            Ok(_) => {
                tracing::warn!(
                    user_id = claim.user_id,
                    "Credential changed during reset; token claim rolled back"
                );
                Self::rollback(txn).await;
                Ok(false)
            }
            Err(e) => {
                Self::rollback(txn).await;
                Err(AppError::from(e))
            }
        }
    }
}
