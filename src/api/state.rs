//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, Notifier};
use crate::services::{
    AuthService, PositionService, ServiceContainer, Services, UnitService, UserService,
};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub position_service: Arc<dyn PositionService>,
    pub unit_service: Arc<dyn UnitService>,
    /// Database connection, used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Build every service on top of `database`.
    pub fn from_config(
        database: Arc<Database>,
        config: &Config,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let container = Services::from_connection(database.get_connection(), config, notifier);
        Self::from_container(&container, database)
    }

    /// Take services from an already assembled container.
    pub fn from_container(container: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            position_service: container.positions(),
            unit_service: container.units(),
            database,
        }
    }
}
