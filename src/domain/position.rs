//! Job position reference data.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::DEFAULT_POSITION_STATUS;

/// Job position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Profesional Universitario")]
    pub name: String,
    #[schema(example = "Profesional")]
    pub title: String,
    #[schema(example = "02")]
    pub grade: String,
    pub competency: String,
    pub executive_level: bool,
    #[schema(example = "Activo")]
    pub status: String,
}

/// Position create/replace payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PositionInput {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Profesional Universitario")]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub competency: String,
    #[serde(default)]
    pub executive_level: bool,
    /// Defaults to "Activo"
    pub status: Option<String>,
}

impl PositionInput {
    /// Status to store, falling back to the default when absent or blank.
    pub fn status(&self) -> &str {
        self.status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_POSITION_STATUS)
    }
}
