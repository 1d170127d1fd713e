use std::str::FromStr;

use axum::extract::State;
use nutrifilter_core::domain::{
    classification::entities::DietPreference,
    recipe::{entities::RecipeMatch, ports::RecipeService, value_objects::FilterRecipesInput},
};
use tracing::instrument;

use crate::application::http::{
    recipe::validators::GetRecipesQuery,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateQuery},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "",
    tag = "recipe",
    summary = "Filter recipes by health conditions",
    description = "Classifies every servable catalog recipe against the requested conditions and optional diet, and returns the suitable ones ranked by descending classification score. An empty condition list yields an empty result.",
    params(GetRecipesQuery),
    responses(
        (status = 200, body = Vec<RecipeMatch>),
        (status = 400, description = "Unknown diet or out of range min_score", body = ApiErrorResponse),
        (status = 502, description = "Classifier failure", body = ApiErrorResponse),
        (status = 504, description = "Request timed out", body = ApiErrorResponse)
    ),
)]
#[instrument(skip(state))]
pub async fn get_recipes(
    State(state): State<AppState>,
    ValidateQuery(query): ValidateQuery<GetRecipesQuery>,
) -> Result<Response<Vec<RecipeMatch>>, ApiError> {
    let diet = query
        .diet
        .as_deref()
        .map(str::trim)
        .filter(|diet| !diet.is_empty())
        .map(DietPreference::from_str)
        .transpose()?;

    let matches = state
        .service
        .filter_recipes(FilterRecipesInput {
            conditions: query.all_conditions(),
            diet,
            min_score: query.min_score,
        })
        .await?;

    Ok(Response::OK(matches))
}
