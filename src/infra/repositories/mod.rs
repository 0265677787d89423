//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod position_repository;
mod reset_token_repository;
mod unit_repository;
mod user_repository;

pub use position_repository::{PositionRepository, PositionStore};
pub use reset_token_repository::{ResetTokenRepository, ResetTokenStore};
pub use unit_repository::{UnitRepository, UnitStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use position_repository::MockPositionRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use reset_token_repository::MockResetTokenRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use unit_repository::MockUnitRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
