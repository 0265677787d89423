//! Domain layer - Core business entities and logic
//!
//! Entities and value objects independent of storage and transport.

pub mod credential;
pub mod password;
pub mod password_policy;
pub mod position;
pub mod reset_token;
pub mod unit;
pub mod user;

pub use credential::{Credential, Verification};
pub use password::{HashScheme, Password};
pub use password_policy::{PasswordComplexity, PasswordRequirements};
pub use position::{Position, PositionInput};
pub use reset_token::{IssuedResetToken, ResetClaim, ResetSecret, ResetToken};
pub use unit::{Unit, UnitInput};
pub use user::{CreateUser, UpdateUser, User, UserListItem, UserProfile, UserResponse};
