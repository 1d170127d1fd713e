use std::future::Future;
use std::sync::Arc;

use crate::domain::{
    common::entities::app_errors::CoreError,
    recipe::{
        entities::{Recipe, RecipeMatch},
        value_objects::FilterRecipesInput,
    },
};

/// Read-only recipe catalog, loaded once at startup.
#[cfg_attr(test, mockall::automock)]
pub trait RecipeCatalog: Send + Sync {
    fn recipes(&self) -> Arc<[Recipe]>;
}

/// Service trait for catalog filtering
pub trait RecipeService: Send + Sync {
    /// Recipes suitable for every requested condition, best match first.
    fn filter_recipes(
        &self,
        input: FilterRecipesInput,
    ) -> impl Future<Output = Result<Vec<RecipeMatch>, CoreError>> + Send;
}
