//! Position service - job position reference data.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Position, PositionInput};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

#[async_trait]
pub trait PositionService: Send + Sync {
    async fn list_positions(&self) -> AppResult<Vec<Position>>;

    async fn create_position(&self, input: PositionInput) -> AppResult<Position>;

    async fn update_position(&self, id: i32, input: PositionInput) -> AppResult<Position>;

    async fn delete_position(&self, id: i32) -> AppResult<()>;
}

pub struct PositionManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> PositionManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> PositionService for PositionManager<U> {
    async fn list_positions(&self) -> AppResult<Vec<Position>> {
        self.uow.positions().list().await
    }

    async fn create_position(&self, input: PositionInput) -> AppResult<Position> {
        self.uow.positions().create(input).await
    }

    async fn update_position(&self, id: i32, input: PositionInput) -> AppResult<Position> {
        self.uow.positions().update(id, input).await
    }

    async fn delete_position(&self, id: i32) -> AppResult<()> {
        self.uow.positions().delete(id).await
    }
}
