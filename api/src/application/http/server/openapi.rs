use crate::application::http::{
    chat::router::ChatApiDoc, food_analysis::router::FoodAnalysisApiDoc,
    health::router::HealthApiDoc, models::router::ModelsApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "HealthScan AI API",
    description = "Food photo analysis and nutrition chat powered by Gemini"
))]
pub struct ApiDoc;

impl ApiDoc {
    /// Full document with every route group merged in.
    pub fn build() -> utoipa::openapi::OpenApi {
        let mut openapi = ApiDoc::openapi();
        openapi.merge(FoodAnalysisApiDoc::openapi());
        openapi.merge(ChatApiDoc::openapi());
        openapi.merge(HealthApiDoc::openapi());
        openapi.merge(ModelsApiDoc::openapi());
        openapi
    }
}
