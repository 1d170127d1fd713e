use axum::extract::State;
use nutrifilter_core::domain::health::{entities::CatalogHealthStatus, ports::HealthCheckService};

use crate::application::http::server::{api_entities::response::Response, app_state::AppState};

#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    summary = "Readiness probe",
    description = "Reports the loaded catalog, how many records can be classified, and the current cache occupancy.",
    responses(
        (status = 200, body = CatalogHealthStatus)
    ),
)]
pub async fn get_ready(State(state): State<AppState>) -> Response<CatalogHealthStatus> {
    Response::OK(state.service.readiness())
}
