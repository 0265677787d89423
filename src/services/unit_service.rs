//! Unit service - organizational unit reference data.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Unit, UnitInput};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

#[async_trait]
pub trait UnitService: Send + Sync {
    async fn list_units(&self) -> AppResult<Vec<Unit>>;

    async fn create_unit(&self, input: UnitInput) -> AppResult<Unit>;

    async fn update_unit(&self, id: i32, input: UnitInput) -> AppResult<Unit>;

    async fn delete_unit(&self, id: i32) -> AppResult<()>;
}

pub struct UnitManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UnitManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UnitService for UnitManager<U> {
    async fn list_units(&self) -> AppResult<Vec<Unit>> {
        self.uow.units().list().await
    }

    async fn create_unit(&self, input: UnitInput) -> AppResult<Unit> {
        self.uow.units().create(input).await
    }

    async fn update_unit(&self, id: i32, input: UnitInput) -> AppResult<Unit> {
        self.uow.units().update(id, input).await
    }

    async fn delete_unit(&self, id: i32) -> AppResult<()> {
        self.uow.units().delete(id).await
    }
}
