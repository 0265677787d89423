//! Migrate command - Database migration management.

use sea_orm::DbErr;

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Migrations are driven explicitly here, not on connect
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| migration_error("Database connection failed", e))?;

    match args.action {
        MigrateAction::Up => {
            db.run_migrations()
                .await
                .map_err(|e| migration_error("Migration failed", e))?;
            tracing::info!("Pending migrations applied");
            print_status(&db).await?;
        }
        MigrateAction::Down => {
            db.rollback_migration()
                .await
                .map_err(|e| migration_error("Rollback failed", e))?;
            tracing::info!("Last migration rolled back");
            print_status(&db).await?;
        }
        MigrateAction::Status => print_status(&db).await?,
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables and re-running every migration");
            db.fresh_migrations()
                .await
                .map_err(|e| migration_error("Fresh migration failed", e))?;
            print_status(&db).await?;
        }
    }

    Ok(())
}

async fn print_status(db: &Database) -> AppResult<()> {
    let status = db
        .migration_status()
        .await
        .map_err(|e| migration_error("Status query failed", e))?;

    for (name, applied) in status {
        println!("{:<60} {}", name, if applied { "applied" } else { "pending" });
    }
    Ok(())
}

fn migration_error(context: &str, e: DbErr) -> AppError {
    AppError::internal(format!("{}: {}", context, e))
}
