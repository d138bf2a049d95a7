use chrono::Utc;

pub mod entities;
pub mod services;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Clone, Debug)]
pub struct HealthScanConfig {
    pub llm: LLMConfig,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub vision_model: String,
    pub chat_model: String,
}

impl LLMConfig {
    pub fn new(gemini_api_key: String) -> Self {
        Self {
            gemini_api_key,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            vision_model: DEFAULT_GEMINI_MODEL.to_string(),
            chat_model: DEFAULT_GEMINI_MODEL.to_string(),
        }
    }
}

/// Current time as fractional unix seconds.
pub fn generate_timestamp() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
