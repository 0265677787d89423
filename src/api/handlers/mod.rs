//! HTTP request handlers.

pub mod auth_handler;
pub mod position_handler;
pub mod unit_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use position_handler::position_routes;
pub use unit_handler::unit_routes;
pub use user_handler::user_routes;
