//! Unit repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::entities::unit::{self, ActiveModel, Entity as UnitEntity};
use crate::domain::{Unit, UnitInput};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Unit repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UnitRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Unit>>;

    async fn create(&self, input: UnitInput) -> AppResult<Unit>;

    async fn update(&self, id: i32, input: UnitInput) -> AppResult<Unit>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of UnitRepository
pub struct UnitStore {
    db: DatabaseConnection,
}

impl UnitStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UnitRepository for UnitStore {
    async fn list(&self) -> AppResult<Vec<Unit>> {
        let models = UnitEntity::find()
            .order_by_asc(unit::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Unit::from).collect())
    }

    async fn create(&self, input: UnitInput) -> AppResult<Unit> {
        let active = ActiveModel {
            code: Set(input.code),
            name: Set(input.name),
            ..Default::default()
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Unit::from(model))
    }

    async fn update(&self, id: i32, input: UnitInput) -> AppResult<Unit> {
        let unit = UnitEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = unit.into();
        active.code = Set(input.code);
        active.name = Set(input.name);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Unit::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = UnitEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
