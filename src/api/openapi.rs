//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, position_handler, unit_handler, user_handler};
use crate::domain::{
    CreateUser, PasswordRequirements, Position, PositionInput, Unit, UnitInput, UpdateUser,
    UserListItem, UserResponse,
};
use crate::services::{ForgotPasswordResponse, LoginResponse, SessionUser};
use crate::types::{CreatedResponse, MessageResponse};

/// OpenAPI documentation for the EDL backend
#[derive(OpenApi)]
#[openapi(
    info(
        title = "EDL Backend",
        version = "0.1.0",
        description = "Authentication and catalog management for the EDL personnel-evaluation system"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::login,
        auth_handler::forgot_password,
        auth_handler::reset_password,
        user_handler::get_current_user,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::delete_user,
        position_handler::list_positions,
        position_handler::create_position,
        position_handler::update_position,
        position_handler::delete_position,
        unit_handler::list_units,
        unit_handler::create_unit,
        unit_handler::update_unit,
        unit_handler::delete_unit,
    ),
    components(
        schemas(
            auth_handler::LoginRequest,
            auth_handler::ForgotPasswordRequest,
            auth_handler::ResetPasswordRequest,
            LoginResponse,
            SessionUser,
            ForgotPasswordResponse,
            PasswordRequirements,
            UserResponse,
            UserListItem,
            CreateUser,
            UpdateUser,
            Position,
            PositionInput,
            Unit,
            UnitInput,
            CreatedResponse,
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and password recovery"),
        (name = "Users", description = "User management"),
        (name = "Positions", description = "Position catalog"),
        (name = "Units", description = "Organizational unit catalog")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
