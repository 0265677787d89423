//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, SqlErr,
};

use super::entities::{
    position,
    user::{self, ActiveModel, Entity as UserEntity},
    unit,
};
use crate::domain::{Password, User, UserListItem, UserProfile};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user by exact username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// List users joined with their position and unit names
    async fn list(&self) -> AppResult<Vec<UserListItem>>;

    /// Insert a user with an already hashed password
    async fn create(&self, profile: UserProfile, password: Password) -> AppResult<User>;

    /// Replace every profile column; the password only when given
    async fn update(&self, id: i32, profile: UserProfile, password: Option<Password>)
        -> AppResult<User>;

    /// Overwrite the stored credential
    async fn set_password(&self, id: i32, password: Password) -> AppResult<()>;

    /// Replace the credential only while the column still holds `expected`.
    ///
    /// Returns `false` when it changed in between; nothing is written then.
    async fn migrate_password(&self, id: i32, expected: String, password: Password)
        -> AppResult<bool>;

    /// Delete user by ID
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Listing row: every user column plus the joined names.
#[derive(Debug, FromQueryResult)]
struct UserWithRefs {
    id: i32,
    document: String,
    issue_place: String,
    full_name: String,
    hire_date: Option<chrono::NaiveDate>,
    position_id: Option<i32>,
    unit_id: Option<i32>,
    appointment: String,
    username: String,
    password: String,
    email: Option<String>,
    position_name: Option<String>,
    unit_name: Option<String>,
}

impl From<UserWithRefs> for UserListItem {
    fn from(row: UserWithRefs) -> Self {
        let user = User::from(user::Model {
            id: row.id,
            document: row.document,
            issue_place: row.issue_place,
            full_name: row.full_name,
            hire_date: row.hire_date,
            position_id: row.position_id,
            unit_id: row.unit_id,
            appointment: row.appointment,
            username: row.username,
            password: row.password,
            email: row.email,
        });
        UserListItem::new(user, row.position_name, row.unit_name)
    }
}

/// Map a unique-key violation on `users.username` to a conflict
fn map_write_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Username"),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            AppError::validation("Referenced position or unit does not exist")
        }
        _ => AppError::from(err),
    }
}

fn apply_profile(active: &mut ActiveModel, profile: UserProfile) {
    active.document = Set(profile.document);
    active.issue_place = Set(profile.issue_place);
    active.full_name = Set(profile.full_name);
    active.hire_date = Set(profile.hire_date);
    active.position_id = Set(profile.position_id);
    active.unit_id = Set(profile.unit_id);
    active.appointment = Set(profile.appointment);
    active.username = Set(profile.username);
    active.email = Set(profile.email);
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn list(&self) -> AppResult<Vec<UserListItem>> {
        let rows = UserEntity::find()
            .column_as(Expr::col((position::Entity, position::Column::Name)), "position_name")
            .column_as(Expr::col((unit::Entity, unit::Column::Name)), "unit_name")
            .join(JoinType::LeftJoin, user::Relation::Position.def())
            .join(JoinType::LeftJoin, user::Relation::Unit.def())
            .order_by_asc(user::Column::Id)
            .into_model::<UserWithRefs>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows.into_iter().map(UserListItem::from).collect())
    }

    async fn create(&self, profile: UserProfile, password: Password) -> AppResult<User> {
        let mut active = ActiveModel {
            password: Set(password.into_string()),
            ..Default::default()
        };
        apply_profile(&mut active, profile);

        let model = active.insert(&self.db).await.map_err(map_write_error)?;
        Ok(User::from(model))
    }

    async fn update(
        &self,
        id: i32,
        profile: UserProfile,
        password: Option<Password>,
    ) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = user.into();
        apply_profile(&mut active, profile);
        if let Some(password) = password {
            active.password = Set(password.into_string());
        }

        let model = active.update(&self.db).await.map_err(map_write_error)?;
        Ok(User::from(model))
    }

    async fn set_password(&self, id: i32, password: Password) -> AppResult<()> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::Password, Expr::value(password.into_string()))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn migrate_password(
        &self,
        id: i32,
        expected: String,
        password: Password,
    ) -> AppResult<bool> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::Password, Expr::value(password.into_string()))
            .filter(user::Column::Id.eq(id))
            .filter(user::Column::Password.eq(expected))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected == 1)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
