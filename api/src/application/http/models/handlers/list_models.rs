use axum::extract::State;

use crate::application::http::server::{api_entities::response::Response, app_state::AppState};
use healthscan_core::domain::models::{entities::ModelCatalog, services::ModelService};

#[utoipa::path(
    get,
    path = "/models",
    tag = "models",
    summary = "List supported models",
    responses(
        (status = 200, body = ModelCatalog)
    ),
)]
pub async fn list_models(State(state): State<AppState>) -> Response<ModelCatalog> {
    Response::OK(state.service.list_models())
}
