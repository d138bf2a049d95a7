use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const SERVICE_NAME: &str = "HealthScan AI API";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActiveModels {
    pub vision: String,
    pub chat: String,
}

/// Outcome of probing the upstream model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum HealthReport {
    Healthy {
        service: String,
        gemini_status: String,
        version: String,
        models: ActiveModels,
    },
    Unhealthy {
        error: String,
    },
}
