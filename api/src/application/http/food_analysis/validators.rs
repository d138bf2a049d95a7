use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct AnalyzeFoodRequest {
    /// Base64 encoded image, a `data:image/...;base64,` prefix is accepted.
    #[validate(length(min = 1, message = "image_data must not be empty"))]
    pub image_data: String,
    /// Replaces the built-in analysis prompt.
    pub prompt: Option<String>,
    pub user_preferences: Option<serde_json::Value>,
}
