//! Operator password commands.
//!
//! `hash-password` stores a fresh hash without applying the password policy.
//! `check-login` runs the same verification as the login endpoint, including
//! the legacy plaintext migration.

use std::sync::Arc;

use crate::cli::args::CredentialArgs;
use crate::config::Config;
use crate::domain::Password;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, MailNotifier, Persistence, UnitOfWork};
use crate::services::{Authenticator, LoginOutcome};

/// Execute the hash-password command
pub async fn hash_password(args: CredentialArgs, config: Config) -> AppResult<()> {
    if args.password.is_empty() {
        return Err(AppError::validation("Password must not be empty"));
    }

    let db = Database::connect(&config).await?;
    let uow = Persistence::new(db.get_connection());

    let user = uow
        .users()
        .find_by_username(&args.username)
        .await?
        .ok_or(AppError::NotFound)?;

    let password = Password::new(&args.password)?;
    let scheme = password.scheme();
    uow.users().set_password(user.id, password).await?;

    tracing::info!(user_id = user.id, "Password hash stored");
    println!("Password for '{}' updated ({:?})", user.username, scheme);

    Ok(())
}

/// Execute the check-login command
pub async fn check_login(args: CredentialArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let uow = Arc::new(Persistence::new(db.get_connection()));
    let auth = Authenticator::new(uow, &config, Arc::new(MailNotifier::disabled()));

    match auth.authenticate(&args.username, &args.password).await {
        Ok(LoginOutcome { user, migrated }) => {
            println!("Login OK for '{}' (id {})", user.username, user.id);
            if migrated {
                println!("Stored plaintext password was migrated to a hash");
            }
            Ok(())
        }
        Err(AppError::InvalidCredentials) => {
            println!("Login rejected: invalid username or password");
            Err(AppError::InvalidCredentials)
        }
        Err(e) => Err(e),
    }
}
