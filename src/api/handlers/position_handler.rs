//! Position handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Position, PositionInput};
use crate::errors::AppResult;
use crate::types::{CreatedResponse, MessageResponse};

/// Create position routes
pub fn position_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_positions).post(create_position))
        .route("/:id", put(update_position).delete(delete_position))
}

/// List positions
#[utoipa::path(
    get,
    path = "/positions",
    tag = "Positions",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All positions", body = Vec<Position>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_positions(State(state): State<AppState>) -> AppResult<Json<Vec<Position>>> {
    Ok(Json(state.position_service.list_positions().await?))
}

/// Create a position
#[utoipa::path(
    post,
    path = "/positions",
    tag = "Positions",
    security(("bearer_auth" = [])),
    request_body = PositionInput,
    responses(
        (status = 201, description = "Position created", body = CreatedResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_position(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<PositionInput>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let position = state.position_service.create_position(payload).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: position.id })))
}

/// Replace a position
#[utoipa::path(
    put,
    path = "/positions/{id}",
    tag = "Positions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Position ID")),
    request_body = PositionInput,
    responses(
        (status = 200, description = "Position updated", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Position not found")
    )
)]
pub async fn update_position(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<PositionInput>,
) -> AppResult<Json<MessageResponse>> {
    state.position_service.update_position(id, payload).await?;
    Ok(Json(MessageResponse::new("Position updated")))
}

/// Delete a position
#[utoipa::path(
    delete,
    path = "/positions/{id}",
    tag = "Positions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Position ID")),
    responses(
        (status = 200, description = "Position deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Position not found")
    )
)]
pub async fn delete_position(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.position_service.delete_position(id).await?;
    Ok(Json(MessageResponse::new("Position deleted")))
}
