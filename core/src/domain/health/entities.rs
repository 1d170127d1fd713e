use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::classification::value_objects::EvaluationMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CatalogHealthStatus {
    pub recipes: usize,
    pub servable_recipes: usize,
    pub cached_verdicts: usize,
    pub cached_diets: usize,
    pub evaluation_mode: EvaluationMode,
    pub min_score: f64,
}
