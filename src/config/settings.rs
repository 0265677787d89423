//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DEV_FRONTEND_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_SMTP_PORT,
    MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Deployment environment.
///
/// Only `Development` may echo reset links or log them as a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Production,
}

impl AppEnvironment {
    fn parse(value: Option<String>) -> AppResult<Self> {
        match value.as_deref().map(str::trim) {
            None | Some("") => Ok(AppEnvironment::Production),
            Some(v) if v.eq_ignore_ascii_case("production") => Ok(AppEnvironment::Production),
            Some(v) if v.eq_ignore_ascii_case("development") => Ok(AppEnvironment::Development),
            Some(other) => Err(AppError::configuration(format!(
                "APP_ENV must be 'production' or 'development', got '{}'",
                other
            ))),
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, AppEnvironment::Production)
    }
}

/// Outbound email transport.
#[derive(Clone)]
pub enum EmailTransport {
    /// Explicit SMTP relay
    Smtp {
        host: String,
        port: u16,
        /// Implicit TLS (usually port 465); STARTTLS otherwise
        secure: bool,
        username: String,
        password: String,
    },
    /// Gmail relay with an application password
    Gmail {
        username: String,
        app_password: String,
    },
}

impl EmailTransport {
    /// Human-readable transport name for logs.
    pub fn method(&self) -> &'static str {
        match self {
            EmailTransport::Smtp { .. } => "SMTP",
            EmailTransport::Gmail { .. } => "Gmail",
        }
    }

    fn username(&self) -> &str {
        match self {
            EmailTransport::Smtp { username, .. } => username,
            EmailTransport::Gmail { username, .. } => username,
        }
    }
}

/// Email settings. A missing transport is allowed and degrades to logging.
#[derive(Clone, Default)]
pub struct EmailSettings {
    pub transport: Option<EmailTransport>,
    pub from: Option<String>,
}

impl EmailSettings {
    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    /// Sender address: `EMAIL_FROM`, else the transport's account.
    pub fn sender(&self) -> Option<&str> {
        self.from
            .as_deref()
            .or_else(|| self.transport.as_ref().map(EmailTransport::username))
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub environment: AppEnvironment,
    pub frontend_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub email: EmailSettings,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("environment", &self.environment)
            .field("frontend_url", &self.frontend_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field(
                "email",
                &self.email.transport.as_ref().map(EmailTransport::method),
            )
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment (and `.env`).
    ///
    /// # Errors
    /// Returns a configuration error when DATABASE_URL or JWT_SECRET is
    /// missing, the secret is too short, or FRONTEND_URL is missing in
    /// production.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL")
            .ok_or_else(|| AppError::configuration("DATABASE_URL must be set"))?;

        let jwt_secret =
            get("JWT_SECRET").ok_or_else(|| AppError::configuration("JWT_SECRET must be set"))?;
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::configuration(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        let environment = AppEnvironment::parse(get("APP_ENV"))?;

        let frontend_url = match (get("FRONTEND_URL"), environment) {
            (Some(url), _) => url.trim_end_matches('/').to_string(),
            (None, AppEnvironment::Development) => DEFAULT_DEV_FRONTEND_URL.to_string(),
            (None, AppEnvironment::Production) => {
                return Err(AppError::configuration(
                    "FRONTEND_URL must be set in production",
                ))
            }
        };

        let server_port = match get("SERVER_PORT") {
            Some(port) => port.parse().map_err(|_| {
                AppError::configuration(format!("SERVER_PORT is not a valid port: {}", port))
            })?,
            None => DEFAULT_SERVER_PORT,
        };

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            database_url,
            jwt_secret,
            environment,
            frontend_url,
            server_host: get("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port,
            cors_allowed_origins,
            email: Self::email_from_lookup(&get)?,
        })
    }

    fn email_from_lookup<F>(get: &F) -> AppResult<EmailSettings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let smtp = (get("SMTP_HOST"), get("SMTP_USER"), get("SMTP_PASS"));
        let gmail = (get("GMAIL_USER"), get("GMAIL_APP_PASSWORD"));

        let transport = match (smtp, gmail) {
            ((Some(host), Some(username), Some(password)), _) => {
                let port = match get("SMTP_PORT") {
                    Some(port) => port.parse().map_err(|_| {
                        AppError::configuration(format!("SMTP_PORT is not a valid port: {}", port))
                    })?,
                    None => DEFAULT_SMTP_PORT,
                };
                Some(EmailTransport::Smtp {
                    host,
                    port,
                    secure: get("SMTP_SECURE").is_some_and(|v| v == "true" || v == "1"),
                    username,
                    password,
                })
            }
            (_, (Some(username), Some(app_password))) => Some(EmailTransport::Gmail {
                username,
                app_password,
            }),
            _ => None,
        };

        Ok(EmailSettings {
            transport,
            from: get("EMAIL_FROM"),
        })
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
