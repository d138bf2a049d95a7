use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_timestamp, services::Service},
    food_analysis::{
        entities::FoodAnalysisResult,
        helpers::decode_base64_image,
        ports::{FoodAnalysisService, LLMClient},
        prompt::create_food_analysis_prompt,
        value_objects::{AnalyzeFoodInput, GenerationOptions},
    },
};

// Low temperature keeps analyses consistent across calls.
const VISION_TEMPERATURE: f32 = 0.4;
const VISION_MAX_OUTPUT_TOKENS: u32 = 2000;

impl<LLM> FoodAnalysisService for Service<LLM>
where
    LLM: LLMClient,
{
    #[instrument(skip_all, fields(custom_prompt = input.prompt.is_some()))]
    async fn analyze_food(&self, input: AnalyzeFoodInput) -> Result<FoodAnalysisResult, CoreError> {
        // 1. Decode the image before any model call
        let image = decode_base64_image(&input.image_data)?;

        // 2. Pick the prompt
        let prompt = match input.prompt.filter(|prompt| !prompt.trim().is_empty()) {
            Some(prompt) => prompt,
            None => create_food_analysis_prompt(input.user_preferences.as_ref()),
        };

        // 3. Call LLM
        let model = self.llm_config.vision_model.clone();
        let analysis = self
            .llm_client
            .generate_with_image(
                prompt,
                image,
                GenerationOptions {
                    model: model.clone(),
                    temperature: VISION_TEMPERATURE,
                    max_output_tokens: VISION_MAX_OUTPUT_TOKENS,
                },
            )
            .await?;

        // 4. Pull structured fields out of the free text
        let metrics = self.extractor.extract_metrics(&analysis);

        tracing::info!(
            health_score = metrics.health_score,
            estimated_calories = metrics.estimated_calories,
            model = %model,
            "Food analysis completed"
        );

        Ok(FoodAnalysisResult {
            success: true,
            analysis,
            health_score: metrics.health_score,
            estimated_calories: metrics.estimated_calories,
            model_used: model,
            timestamp: generate_timestamp(),
        })
    }
}
