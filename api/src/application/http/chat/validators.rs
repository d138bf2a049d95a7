use healthscan_core::domain::chat::entities::ChatMessage;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

fn default_stream() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, message = "messages must not be empty"))]
    pub messages: Vec<ChatMessage>,
    /// Previous analysis result the conversation refers to.
    pub context: Option<serde_json::Value>,
    #[serde(default = "default_stream")]
    #[schema(default = true)]
    pub stream: bool,
    #[validate(range(min = 0.0, max = 2.0, message = "temperature must be between 0 and 2"))]
    #[schema(example = 0.7)]
    pub temperature: Option<f32>,
    #[validate(range(min = 1, max = 8192, message = "max_tokens must be between 1 and 8192"))]
    #[schema(example = 1000)]
    pub max_tokens: Option<u32>,
}
