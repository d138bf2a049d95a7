use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AvailableModels {
    pub vision: Vec<String>,
    pub chat: Vec<String>,
    pub multimodal: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CurrentModelConfig {
    pub vision_model: String,
    pub chat_model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ModelCatalog {
    pub available_models: AvailableModels,
    pub current_config: CurrentModelConfig,
}
