//! Organizational unit reference data.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Organizational unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    #[schema(example = 1)]
    pub id: i32,
    /// Administrative code
    #[schema(example = "100")]
    pub code: String,
    #[schema(example = "Secretaría General")]
    pub name: String,
}

/// Unit create/replace payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitInput {
    #[validate(length(min = 1, message = "Code is required"))]
    #[schema(example = "100")]
    pub code: String,
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Secretaría General")]
    pub name: String,
}
