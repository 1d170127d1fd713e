use axum::{Router, routing::get};
use utoipa::OpenApi;

use super::handlers::{
    get_live::{__path_get_live, get_live},
    get_ready::{__path_get_ready, get_ready},
};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_live, get_ready))]
pub struct HealthApiDoc;

pub fn health_routes(root_path: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("{}/health/live", root_path), get(get_live))
        .route(&format!("{}/health/ready", root_path), get(get_ready))
}
