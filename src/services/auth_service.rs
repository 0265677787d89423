//! Authentication service - login, forgot-password and reset-password.
//!
//! Credentials are verified through the domain [`Credential`] so legacy
//! plaintext values are upgraded on their owner's first successful login.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::reset_tokens::ResetTokenManager;
use super::session::{Claims, SessionIssuer};
use crate::config::{
    AppEnvironment, Config, FORGOT_PASSWORD_MESSAGE, RESET_LINK_PATH, RESET_PASSWORD_MESSAGE,
};
use crate::domain::{password_policy, Password, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{Notifier, NotifierResult, UnitOfWork};
use crate::types::MessageResponse;

/// Well-formed Argon2id hash verified against when the username is unknown,
/// so both branches of a failed login cost one hash computation.
const TIMING_EQUALIZER_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Authenticated user summary returned on login
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "admin")]
    pub username: String,
    #[schema(example = "Administrador General")]
    pub display_name: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    /// JWT session token, valid for 8 hours
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    pub user: SessionUser,
}

/// Forgot-password response
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordResponse {
    pub message: String,
    /// Development only, when the email could not be delivered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_link: Option<String>,
}

/// Outcome of a login attempt, for operator diagnostics.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    /// The stored plaintext was replaced by a hash during this login
    pub migrated: bool,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verify credentials and issue a session token
    async fn login(&self, username: String, password: String) -> AppResult<LoginResponse>;

    /// Issue a reset token and email the link, without revealing whether
    /// the username exists
    async fn forgot_password(&self, username: String) -> AppResult<ForgotPasswordResponse>;

    /// Redeem a reset token and set a new password
    async fn reset_password(&self, token: String, new_password: String)
        -> AppResult<MessageResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    sessions: SessionIssuer,
    reset_tokens: ResetTokenManager<U>,
    notifier: Arc<dyn Notifier>,
    environment: AppEnvironment,
    frontend_url: String,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>, config: &Config, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            reset_tokens: ResetTokenManager::new(uow.clone()),
            uow,
            sessions: SessionIssuer::new(config.jwt_secret_bytes()),
            notifier,
            environment: config.environment,
            frontend_url: config.frontend_url.clone(),
        }
    }

    /// Verify a username/password pair, persisting a migrated hash when the
    /// stored credential was legacy plaintext.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<LoginOutcome> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AppError::validation("Username and password are required"));
        }

        let Some(mut user) = self.uow.users().find_by_username(username).await? else {
            if let Ok(dummy) = Password::from_hash(TIMING_EQUALIZER_HASH.to_string()) {
                dummy.verify(password);
            }
            return Err(AppError::InvalidCredentials);
        };

        if user.credential.is_empty() {
            return Err(AppError::configuration(format!(
                "User {} has no stored password",
                user.id
            )));
        }

        let verification = user.credential.verify(password)?;
        if !verification.valid {
            return Err(AppError::InvalidCredentials);
        }

        let migrated = match verification.migrated {
            Some(hash) => {
                let expected = user.credential.as_stored().to_string();
                let written = self
                    .uow
                    .users()
                    .migrate_password(user.id, expected, hash.clone())
                    .await?;
                if written {
                    tracing::info!(user_id = user.id, "Legacy password migrated to hash");
                    user.credential = hash.into();
                } else {
                    tracing::info!(
                        user_id = user.id,
                        "Password changed before migration; keeping the newer value"
                    );
                }
                written
            }
            None => false,
        };

        Ok(LoginOutcome { user, migrated })
    }

    fn reset_link(&self, secret: &str) -> String {
        format!("{}{}?token={}", self.frontend_url, RESET_LINK_PATH, secret)
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, username: String, password: String) -> AppResult<LoginResponse> {
        let LoginOutcome { user, .. } = self.authenticate(&username, &password).await?;
        let token = self.sessions.issue(user.id, &user.username)?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok(LoginResponse {
            token,
            user: SessionUser {
                id: user.id,
                display_name: user.display_name().to_string(),
                username: user.username,
            },
        })
    }

    async fn forgot_password(&self, username: String) -> AppResult<ForgotPasswordResponse> {
        if username.trim().is_empty() {
            return Err(AppError::validation("Username is required"));
        }

        let generic = |reset_link| ForgotPasswordResponse {
            message: FORGOT_PASSWORD_MESSAGE.to_string(),
            reset_link,
        };

        let Some(user) = self.uow.users().find_by_username(&username).await? else {
            return Ok(generic(None));
        };

        let issued = self.reset_tokens.create(user.id).await?;
        let reset_link = self.reset_link(issued.secret.as_str());
        tracing::info!(user_id = user.id, expires_at = %issued.expires_at, "Reset token issued");

        let delivery = match user.email_address() {
            Some(to) => {
                self.notifier
                    .send_password_reset(to, user.display_name(), &reset_link)
                    .await
            }
            None => {
                tracing::warn!(user_id = user.id, "User has no email address");
                NotifierResult::NotConfigured
            }
        };

        match &delivery {
            NotifierResult::Sent => {
                tracing::info!(user_id = user.id, "Password reset email sent");
            }
            NotifierResult::NotConfigured => {
                tracing::warn!(user_id = user.id, "Password reset email not sent");
            }
            NotifierResult::Failed(reason) => {
                tracing::warn!(user_id = user.id, reason = %reason, "Password reset email failed");
            }
        }

        if delivery.is_sent() || self.environment.is_production() {
            return Ok(generic(None));
        }

        tracing::warn!(
            user_id = user.id,
            reset_link = %reset_link,
            "Reset link fallback (development only)"
        );
        Ok(generic(Some(reset_link)))
    }

    async fn reset_password(
        &self,
        token: String,
        new_password: String,
    ) -> AppResult<MessageResponse> {
        if token.is_empty() || new_password.is_empty() {
            return Err(AppError::validation("Token and new password are required"));
        }

        let complexity = password_policy::validate(&new_password);
        if !complexity.valid {
            return Err(AppError::PasswordPolicy(complexity));
        }

        let claim = self.reset_tokens.lookup(&token).await?;

        let user = self
            .uow
            .users()
            .find_by_id(claim.user_id)
            .await?
            .ok_or_not_found()?;

        if user.credential.matches(&new_password) {
            return Err(AppError::PasswordReuse);
        }

        let password = Password::new(&new_password)?;
        let expected = user.credential.into_stored();
        self.reset_tokens.consume(claim, expected, password).await?;

        tracing::info!(user_id = user.id, "Password reset completed");

        Ok(MessageResponse::new(RESET_PASSWORD_MESSAGE))
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        self.sessions.verify(token)
    }
}
