use super::handlers::analyze_food::{__path_analyze_food, analyze_food};
use crate::application::http::server::app_state::AppState;
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

// Base64 inflates images by a third, leave room for ~10 MB photos.
const MAX_REQUEST_BODY: usize = 16 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(paths(analyze_food))]
pub struct FoodAnalysisApiDoc;

pub fn food_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/analyze-food", state.args.server.root_path),
            post(analyze_food),
        )
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY))
}
