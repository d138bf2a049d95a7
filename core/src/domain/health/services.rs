use crate::domain::{
    common::services::Service,
    food_analysis::{ports::LLMClient, value_objects::GenerationOptions},
    health::{
        entities::{ActiveModels, HealthReport, SERVICE_NAME},
        ports::HealthCheckService,
    },
};

const PROBE_PROMPT: &str = "Hello";
const PROBE_MAX_OUTPUT_TOKENS: u32 = 16;

impl<LLM> HealthCheckService for Service<LLM>
where
    LLM: LLMClient,
{
    async fn health(&self) -> HealthReport {
        let probe = self
            .llm_client
            .generate_with_text(
                PROBE_PROMPT.to_string(),
                GenerationOptions {
                    model: self.llm_config.chat_model.clone(),
                    temperature: 0.0,
                    max_output_tokens: PROBE_MAX_OUTPUT_TOKENS,
                },
            )
            .await;

        match probe {
            Ok(_) => HealthReport::Healthy {
                service: SERVICE_NAME.to_string(),
                gemini_status: "connected".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                models: ActiveModels {
                    vision: self.llm_config.vision_model.clone(),
                    chat: self.llm_config.chat_model.clone(),
                },
            },
            Err(error) => {
                tracing::warn!(%error, "Health probe failed");
                HealthReport::Unhealthy {
                    error: error.to_string(),
                }
            }
        }
    }
}
