use std::sync::Arc;

use crate::domain::{
    common::LLMConfig, food_analysis::extraction::MetricExtractor,
    food_analysis::ports::LLMClient,
};

#[derive(Clone)]
pub struct Service<LLM>
where
    LLM: LLMClient,
{
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) llm_config: LLMConfig,
    pub(crate) extractor: Arc<MetricExtractor>,
}

impl<LLM> Service<LLM>
where
    LLM: LLMClient,
{
    pub fn new(llm_client: LLM, llm_config: LLMConfig, extractor: MetricExtractor) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
            llm_config,
            extractor: Arc::new(extractor),
        }
    }
}
