//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `hash-password` / `check-login` - Operator password tools

pub mod args;

pub use args::{Cli, Commands};
