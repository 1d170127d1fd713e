use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use validator::{Validate, ValidationError};

#[derive(Debug, Default, Serialize, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GetRecipesQuery {
    /// Health or dietary condition; repeat the parameter to require several.
    #[serde(default)]
    pub condition: Vec<String>,

    /// Same as `condition`; both spellings may be mixed in one request.
    #[serde(default)]
    pub conditions: Vec<String>,

    /// `vegetarian` or `non-vegetarian`; empty means no preference.
    #[serde(default)]
    pub diet: Option<String>,

    /// Overrides the configured minimum acceptance score.
    #[serde(default)]
    #[validate(custom(function = "validate_min_score"))]
    pub min_score: Option<f64>,
}

impl GetRecipesQuery {
    /// Every requested condition, whichever spelling carried it.
    pub fn all_conditions(&self) -> Vec<String> {
        self.condition
            .iter()
            .chain(&self.conditions)
            .cloned()
            .collect()
    }
}

fn validate_min_score(min_score: f64) -> Result<(), ValidationError> {
    if (0.0..=1.0).contains(&min_score) {
        Ok(())
    } else {
        Err(ValidationError::new("range").with_message("min_score must be within [0, 1]".into()))
    }
}
