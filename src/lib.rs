//! EDL backend - authentication and catalog API for the EDL
//! personnel-evaluation system.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Credentials, password policy, reset tokens and catalog entities
//! - **services**: Login, password recovery and CRUD use cases
//! - **infra**: Database, repositories and outbound email
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Check a user's login without starting the server
//! cargo run -- check-login admin admin123
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Credential, Password, User};
pub use errors::{AppError, AppResult};
