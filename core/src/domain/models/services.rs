use crate::domain::{
    common::services::Service,
    food_analysis::ports::LLMClient,
    models::entities::{AvailableModels, CurrentModelConfig, ModelCatalog},
};

const VISION_MODELS: &[&str] = &["gemini-2.5-flash", "gemini-2.0-flash"];
const CHAT_MODELS: &[&str] = &["gemini-2.5-flash", "gemini-2.0-flash"];
const MULTIMODAL_MODELS: &[&str] = &["gemini-2.5-flash", "gemini-2.0-flash-live-001"];

/// Static catalogue of the models this deployment knows how to drive.
pub trait ModelService: Send + Sync {
    fn list_models(&self) -> ModelCatalog;
}

impl<LLM> ModelService for Service<LLM>
where
    LLM: LLMClient,
{
    fn list_models(&self) -> ModelCatalog {
        let owned = |models: &[&str]| -> Vec<String> {
            models.iter().map(|model| model.to_string()).collect()
        };

        ModelCatalog {
            available_models: AvailableModels {
                vision: owned(VISION_MODELS),
                chat: owned(CHAT_MODELS),
                multimodal: owned(MULTIMODAL_MODELS),
            },
            current_config: CurrentModelConfig {
                vision_model: self.llm_config.vision_model.clone(),
                chat_model: self.llm_config.chat_model.clone(),
            },
        }
    }
}
