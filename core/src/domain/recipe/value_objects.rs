use crate::domain::classification::entities::DietPreference;

#[derive(Debug, Clone, Default)]
pub struct FilterRecipesInput {
    pub conditions: Vec<String>,
    pub diet: Option<DietPreference>,
    /// Overrides the configured acceptance threshold for this request.
    pub min_score: Option<f64>,
}
