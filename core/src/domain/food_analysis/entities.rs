use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::food_analysis::value_objects::ImageFormat;

/// Reply of a single food photo analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FoodAnalysisResult {
    pub success: bool,
    /// Free-text analysis exactly as returned by the model.
    pub analysis: String,
    pub health_score: u64,
    pub estimated_calories: u64,
    pub model_used: String,
    /// Unix time in seconds.
    pub timestamp: f64,
}

/// Numeric fields pulled out of a free-text analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExtractedMetrics {
    pub health_score: u64,
    pub estimated_calories: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub format: ImageFormat,
    pub data: Vec<u8>,
}

impl ImagePayload {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}
