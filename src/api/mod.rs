//! HTTP surface of the evaluation backend.
//!
//! `/auth` is public; the position, unit and user catalogs sit behind the
//! bearer-token middleware. Request bodies go through [`extractors`], and
//! the OpenAPI document is assembled in [`openapi`].

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
