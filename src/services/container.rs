//! Service Container - Centralized service access.

use std::sync::Arc;

use super::{AuthService, PositionService, UnitService, UserService};
use crate::config::Config;
use crate::infra::{Notifier, Persistence};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get position service
    fn positions(&self) -> Arc<dyn PositionService>;

    /// Get unit service
    fn units(&self) -> Arc<dyn UnitService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    position_service: Arc<dyn PositionService>,
    unit_service: Arc<dyn UnitService>,
}

impl Services {
    /// Create a service container from already built services
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        position_service: Arc<dyn PositionService>,
        unit_service: Arc<dyn UnitService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            position_service,
            unit_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        config: &Config,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        use super::{Authenticator, PositionManager, UnitManager, UserManager};

        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config, notifier)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            position_service: Arc::new(PositionManager::new(uow.clone())),
            unit_service: Arc::new(UnitManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn positions(&self) -> Arc<dyn PositionService> {
        self.position_service.clone()
    }

    fn units(&self) -> Arc<dyn UnitService> {
        self.unit_service.clone()
    }
}
