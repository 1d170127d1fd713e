use std::fmt;

use serde_json::Value;

use crate::domain::recipe::entities::Recipe;

/// Title essen-und-trinken.de serves for removed recipes, plus the
/// mis-encoded form found in older catalog dumps.
pub const DEFAULT_PLACEHOLDER_TITLES: [&str; 2] = [
    "die gewünschte seite ist leider nicht vorhanden",
    "die gewÃ¼nschte seite ist leider nicht vorhanden",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingTitle,
    PlaceholderTitle,
    MissingIngredients,
    MissingInstructions,
    MissingNutrition,
    MissingSummary,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::MissingTitle => "missing title",
            SkipReason::PlaceholderTitle => "placeholder title",
            SkipReason::MissingIngredients => "missing ingredients",
            SkipReason::MissingInstructions => "missing instructions",
            SkipReason::MissingNutrition => "missing nutrition",
            SkipReason::MissingSummary => "missing summary text",
        };
        f.write_str(reason)
    }
}

/// Decides which catalog records are complete enough to be classified.
#[derive(Debug, Clone)]
pub struct RecordPolicy {
    placeholder_titles: Vec<String>,
}

impl RecordPolicy {
    pub fn new<I, S>(placeholder_titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            placeholder_titles: placeholder_titles
                .into_iter()
                .map(|title| normalize_title(title.as_ref()))
                .filter(|title| !title.is_empty())
                .collect(),
        }
    }

    /// Why a record has to be skipped, or `None` when it can be classified.
    pub fn rejection(&self, recipe: &Recipe) -> Option<SkipReason> {
        let title = recipe.title.as_deref().map(normalize_title).unwrap_or_default();
        if title.is_empty() {
            return Some(SkipReason::MissingTitle);
        }
        if self.placeholder_titles.contains(&title) {
            return Some(SkipReason::PlaceholderTitle);
        }
        if recipe.ingredients.is_empty() {
            return Some(SkipReason::MissingIngredients);
        }
        if is_blank(&recipe.instructions) {
            return Some(SkipReason::MissingInstructions);
        }
        if recipe.nutrition.as_ref().is_none_or(|nutrition| nutrition.is_empty()) {
            return Some(SkipReason::MissingNutrition);
        }
        if recipe.summary().is_none() {
            return Some(SkipReason::MissingSummary);
        }

        None
    }

    pub fn is_servable(&self, recipe: &Recipe) -> bool {
        self.rejection(recipe).is_none()
    }
}

impl Default for RecordPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER_TITLES)
    }
}

fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Number(_) => false,
    }
}
