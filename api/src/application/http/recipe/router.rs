use axum::{Router, routing::get};
use utoipa::OpenApi;

use super::handlers::get_recipes::{__path_get_recipes, get_recipes};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_recipes))]
pub struct RecipeApiDoc;

pub fn recipe_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/recipes", state.args.server.root_path),
        get(get_recipes),
    )
}
