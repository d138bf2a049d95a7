use crate::{
    domain::{
        common::{HealthScanConfig, entities::app_errors::CoreError, services::Service},
        food_analysis::extraction::MetricExtractor,
    },
    infrastructure::llm::GeminiLLMClient,
};

pub type HealthScanService = Service<GeminiLLMClient>;

pub fn create_service(
    config: HealthScanConfig,
    extractor: MetricExtractor,
) -> Result<HealthScanService, CoreError> {
    let llm_client = GeminiLLMClient::new(&config.llm)?;

    tracing::info!(
        vision_model = %config.llm.vision_model,
        chat_model = %config.llm.chat_model,
        extraction_rules = extractor.rules().len(),
        "HealthScan service initialized"
    );

    Ok(Service::new(llm_client, config.llm, extractor))
}
