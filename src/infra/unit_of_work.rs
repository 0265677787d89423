//! Unit of Work - centralized repository access.
//!
//! Services depend on this trait rather than on individual stores, so tests
//! can swap the whole persistence layer for mocks or in-memory fakes.
//! Multi-statement atomic units (token replacement, token redemption) are
//! owned by the store that runs them.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    PositionRepository, PositionStore, ResetTokenRepository, ResetTokenStore, UnitRepository,
    UnitStore, UserRepository, UserStore,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Unit of Work trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get position repository
    fn positions(&self) -> Arc<dyn PositionRepository>;

    /// Get unit repository
    fn units(&self) -> Arc<dyn UnitRepository>;

    /// Get password reset token repository
    fn reset_tokens(&self) -> Arc<dyn ResetTokenRepository>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    user_repo: Arc<UserStore>,
    position_repo: Arc<PositionStore>,
    unit_repo: Arc<UnitStore>,
    reset_token_repo: Arc<ResetTokenStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance sharing one connection pool
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            position_repo: Arc::new(PositionStore::new(db.clone())),
            unit_repo: Arc::new(UnitStore::new(db.clone())),
            reset_token_repo: Arc::new(ResetTokenStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn positions(&self) -> Arc<dyn PositionRepository> {
        self.position_repo.clone()
    }

    fn units(&self) -> Arc<dyn UnitRepository> {
        self.unit_repo.clone()
    }

    fn reset_tokens(&self) -> Arc<dyn ResetTokenRepository> {
        self.reset_token_repo.clone()
    }
}
