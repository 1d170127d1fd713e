use utoipa::OpenApi;

use crate::application::http::{health::router::HealthApiDoc, recipe::router::RecipeApiDoc};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nutrifilter API"
    ),
    nest(
        (path = "/recipes", api = RecipeApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
