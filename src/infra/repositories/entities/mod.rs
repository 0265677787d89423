//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod password_reset_token;
pub mod position;
pub mod unit;
pub mod user;
