//! Position repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::entities::position::{self, ActiveModel, Entity as PositionEntity};
use crate::domain::{Position, PositionInput};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Position repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PositionRepository: Send + Sync {
    /// List all positions
    async fn list(&self) -> AppResult<Vec<Position>>;

    /// Insert a position
    async fn create(&self, input: PositionInput) -> AppResult<Position>;

    /// Replace every column of an existing position
    async fn update(&self, id: i32, input: PositionInput) -> AppResult<Position>;

    /// Delete position by ID
    async fn delete(&self, id: i32) -> AppResult<()>;
}

fn apply_input(active: &mut ActiveModel, input: PositionInput) {
    active.status = Set(input.status().to_string());
    active.name = Set(input.name);
    active.title = Set(input.title);
    active.grade = Set(input.grade);
    active.competency = Set(input.competency);
    active.executive_level = Set(input.executive_level);
}

/// Concrete implementation of PositionRepository
pub struct PositionStore {
    db: DatabaseConnection,
}

impl PositionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PositionRepository for PositionStore {
    async fn list(&self) -> AppResult<Vec<Position>> {
        let models = PositionEntity::find()
            .order_by_asc(position::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Position::from).collect())
    }

    async fn create(&self, input: PositionInput) -> AppResult<Position> {
        let mut active = <ActiveModel as ActiveModelTrait>::default();
        apply_input(&mut active, input);

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Position::from(model))
    }

    async fn update(&self, id: i32, input: PositionInput) -> AppResult<Position> {
        let position = PositionEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = position.into();
        apply_input(&mut active, input);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Position::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = PositionEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
