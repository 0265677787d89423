//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and repositories
//! - Outbound email
//! - Unit of Work for repository access

pub mod db;
pub mod email;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use email::{MailNotifier, Notifier, NotifierResult};
pub use repositories::{
    PositionRepository, ResetTokenRepository, UnitRepository, UserRepository,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use email::MockNotifier;
#[cfg(any(test, feature = "test-utils"))]
pub use unit_of_work::MockUnitOfWork;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockPositionRepository, MockResetTokenRepository, MockUnitRepository, MockUserRepository,
};
