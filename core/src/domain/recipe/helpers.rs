use serde_json::{Map, Value};

use crate::domain::recipe::entities::Recipe;

const MISSING: &str = "N/A";

/// Builds the classifier input for a recipe from its ingredients and nutrition.
///
/// `"Ingredients: a, b. Nutrition: 320 kcal, 18g protein, 40g carbs, 9g fat."`
pub fn summarize(recipe: &Recipe) -> String {
    let ingredients = recipe.ingredients.join(", ");
    let empty = Map::new();
    let nutrition = recipe.nutrition.as_ref().unwrap_or(&empty);

    format!(
        "Ingredients: {}. Nutrition: {} kcal, {}g protein, {}g carbs, {}g fat.",
        ingredients,
        nutrient(nutrition, "calories"),
        nutrient(nutrition, "proteinContent"),
        nutrient(nutrition, "carbohydrateContent"),
        nutrient(nutrition, "fatContent"),
    )
}

/// Fills `summary_text` on every recipe, replacing what was there.
pub fn with_summaries(recipes: Vec<Recipe>) -> Vec<Recipe> {
    recipes
        .into_iter()
        .map(|mut recipe| {
            recipe.summary_text = Some(summarize(&recipe));
            recipe
        })
        .collect()
}

fn nutrient(nutrition: &Map<String, Value>, key: &str) -> String {
    match nutrition.get(key) {
        None | Some(Value::Null) => MISSING.to_string(),
        Some(Value::String(value)) => value.clone(),
        Some(other) => other.to_string(),
    }
}
