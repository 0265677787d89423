use serde::Serialize;
use utoipa::ToSchema;

/// Message-only response
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Position updated")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Identifier of a newly created row
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    #[schema(example = 1)]
    pub id: i32,
}
