//! User service - Handles user-related business logic.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{password_policy, CreateUser, Password, UpdateUser, User, UserListItem};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// List users with their position and unit names
    async fn list_users(&self) -> AppResult<Vec<UserListItem>>;

    /// Create a user, hashing the supplied password
    async fn create_user(&self, input: CreateUser) -> AppResult<User>;

    /// Replace a user's details; re-hash only when a password is supplied
    async fn update_user(&self, id: i32, input: UpdateUser) -> AppResult<User>;

    /// Delete user
    async fn delete_user(&self, id: i32) -> AppResult<()>;
}

/// Hash a newly chosen password after checking it against the policy
fn hash_new_password(plain: &str) -> AppResult<Password> {
    let complexity = password_policy::validate(plain);
    if !complexity.valid {
        return Err(AppError::PasswordPolicy(complexity));
    }
    Password::new(plain)
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_username_free(&self, username: &str, except: Option<i32>) -> AppResult<()> {
        match self.uow.users().find_by_username(username).await? {
            Some(existing) if Some(existing.id) != except => Err(AppError::conflict("Username")),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or_not_found()
    }

    async fn list_users(&self) -> AppResult<Vec<UserListItem>> {
        self.uow.users().list().await
    }

    async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        let (profile, password) = input.into_parts();
        let password = hash_new_password(&password)?;
        self.ensure_username_free(&profile.username, None).await?;

        let user = self.uow.users().create(profile, password).await?;
        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    async fn update_user(&self, id: i32, input: UpdateUser) -> AppResult<User> {
        let (profile, password) = input.into_parts();
        let password = password.as_deref().map(hash_new_password).transpose()?;
        self.ensure_username_free(&profile.username, Some(id)).await?;

        self.uow.users().update(id, profile, password).await
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        self.uow.users().delete(id).await
    }
}
