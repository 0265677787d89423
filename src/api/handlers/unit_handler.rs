//! Unit handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Unit, UnitInput};
use crate::errors::AppResult;
use crate::types::{CreatedResponse, MessageResponse};

/// Create unit routes
pub fn unit_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_units).post(create_unit))
        .route("/:id", put(update_unit).delete(delete_unit))
}

/// List units
#[utoipa::path(
    get,
    path = "/units",
    tag = "Units",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All units", body = Vec<Unit>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_units(State(state): State<AppState>) -> AppResult<Json<Vec<Unit>>> {
    Ok(Json(state.unit_service.list_units().await?))
}

/// Create a unit
#[utoipa::path(
    post,
    path = "/units",
    tag = "Units",
    security(("bearer_auth" = [])),
    request_body = UnitInput,
    responses(
        (status = 201, description = "Unit created", body = CreatedResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_unit(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UnitInput>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let unit = state.unit_service.create_unit(payload).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: unit.id })))
}

/// Replace a unit
#[utoipa::path(
    put,
    path = "/units/{id}",
    tag = "Units",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Unit ID")),
    request_body = UnitInput,
    responses(
        (status = 200, description = "Unit updated", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Unit not found")
    )
)]
pub async fn update_unit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UnitInput>,
) -> AppResult<Json<MessageResponse>> {
    state.unit_service.update_unit(id, payload).await?;
    Ok(Json(MessageResponse::new("Unit updated")))
}

/// Delete a unit
#[utoipa::path(
    delete,
    path = "/units/{id}",
    tag = "Units",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Unit ID")),
    responses(
        (status = 200, description = "Unit deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Unit not found")
    )
)]
pub async fn delete_unit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.unit_service.delete_unit(id).await?;
    Ok(Json(MessageResponse::new("Unit deleted")))
}
