use axum::extract::State;

use crate::application::http::server::{api_entities::response::Response, app_state::AppState};
use healthscan_core::domain::health::{entities::HealthReport, ports::HealthCheckService};

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Probe the upstream model",
    description = "Always answers 200. The `status` field tells whether the model replied.",
    responses(
        (status = 200, body = HealthReport)
    ),
)]
pub async fn health(State(state): State<AppState>) -> Response<HealthReport> {
    Response::OK(state.service.health().await)
}
