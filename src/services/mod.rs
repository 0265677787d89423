//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on the `UnitOfWork` abstraction
//! for repository access.

mod auth_service;
pub mod container;
mod position_service;
pub mod reset_tokens;
pub mod session;
mod unit_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{
    AuthService, Authenticator, ForgotPasswordResponse, LoginOutcome, LoginResponse, SessionUser,
};
pub use position_service::{PositionManager, PositionService};
pub use reset_tokens::ResetTokenManager;
pub use session::{Claims, SessionIssuer};
pub use unit_service::{UnitManager, UnitService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
