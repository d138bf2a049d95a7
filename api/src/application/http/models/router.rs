use super::handlers::list_models::{__path_list_models, list_models};
use crate::application::http::server::app_state::AppState;
use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(list_models))]
pub struct ModelsApiDoc;

pub fn model_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/models", state.args.server.root_path),
        get(list_models),
    )
}
