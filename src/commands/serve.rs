//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, MailNotifier, Notifier};

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!(environment = ?config.environment, "Starting server...");

    let db = Arc::new(Database::connect(&config).await?);

    let notifier = MailNotifier::from_settings(&config.email)?;
    if !notifier.is_configured() {
        if config.environment.is_production() {
            tracing::warn!("No email transport configured; password reset emails will not be sent");
        } else {
            tracing::info!("No email transport configured; reset links will be logged");
        }
    }

    let app_state = AppState::from_config(db, &config, Arc::new(notifier));
    let app = create_router(app_state, &config.cors_allowed_origins);

    let addr = match (args.host, args.port) {
        (None, None) => config.server_addr(),
        (host, port) => format!(
            "{}:{}",
            host.unwrap_or_else(|| config.server_host.clone()),
            port.unwrap_or(config.server_port)
        ),
    };
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
