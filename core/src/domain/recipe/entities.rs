use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::classification::entities::{Suitability, Verdict};

/// One scraped recipe, as produced by the catalog pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Recipe {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<String>,
    /// Either a list of schema.org `HowToStep` objects or free text.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub instructions: Value,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub nutrition: Option<Map<String, Value>>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_link: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_text: Option<String>,
}

impl Recipe {
    /// Summary text handed to the classifier, if there is a usable one.
    pub fn summary(&self) -> Option<&str> {
        self.summary_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// A recipe accepted for a request, annotated with its verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecipeMatch {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub classification_score: f64,
    pub classification_label: Suitability,
}

impl RecipeMatch {
    pub fn new(recipe: Recipe, verdict: &Verdict) -> Self {
        Self {
            recipe,
            classification_score: verdict.score,
            classification_label: verdict.label,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
