//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Security
// =============================================================================

/// Session token lifetime in hours (fixed, not configurable)
pub const SESSION_TOKEN_LIFETIME_HOURS: i64 = 8;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

// =============================================================================
// Password Reset
// =============================================================================

/// Reset token lifetime in minutes
pub const RESET_TOKEN_LIFETIME_MINUTES: i64 = 15;

/// Random bytes in a reset secret (256 bits of entropy)
pub const RESET_TOKEN_BYTES: usize = 32;

/// Path appended to the frontend base URL in reset links
pub const RESET_LINK_PATH: &str = "/forgot-password";

/// Generic forgot-password reply, identical for known and unknown usernames
pub const FORGOT_PASSWORD_MESSAGE: &str =
    "If the user exists, a password reset link has been sent to their email address.";

/// Reset-password success reply
pub const RESET_PASSWORD_MESSAGE: &str = "Password has been reset successfully";

// =============================================================================
// Password Policy
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Characters accepted as "special" by the password policy
pub const PASSWORD_SPECIAL_CHARACTERS: &str = r#"!@#$%^&*(),.?":{}|<>"#;

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Reset-link base used in development when FRONTEND_URL is unset
pub const DEFAULT_DEV_FRONTEND_URL: &str = "http://localhost:5173";

// =============================================================================
// Email
// =============================================================================

/// Default SMTP submission port
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Gmail SMTP relay host
pub const GMAIL_SMTP_HOST: &str = "smtp.gmail.com";

/// Subject line for reset emails
pub const RESET_EMAIL_SUBJECT: &str = "Password reset - EDL";

// =============================================================================
// Reference Data
// =============================================================================

/// Status assigned to positions created without one
pub const DEFAULT_POSITION_STATUS: &str = "Activo";
