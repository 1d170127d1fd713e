use std::path::Path;
use std::sync::Arc;

use crate::domain::{
    common::entities::app_errors::CoreError,
    recipe::{entities::Recipe, ports::RecipeCatalog},
};

/// Recipe catalog read once from a JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonRecipeCatalog {
    recipes: Arc<[Recipe]>,
}

impl JsonRecipeCatalog {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let recipes = read_recipes(path).await?;

        tracing::info!(
            path = %path.display(),
            recipes = recipes.len(),
            "Recipe catalog loaded"
        );

        Ok(Self::from_recipes(recipes))
    }

    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes: recipes.into(),
        }
    }
}

impl RecipeCatalog for JsonRecipeCatalog {
    fn recipes(&self) -> Arc<[Recipe]> {
        Arc::clone(&self.recipes)
    }
}

pub async fn read_recipes(path: &Path) -> Result<Vec<Recipe>, CoreError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        tracing::error!(path = %path.display(), "Failed to read recipe catalog: {}", e);
        CoreError::CatalogUnavailable(format!("{}: {}", path.display(), e))
    })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::error!(path = %path.display(), "Failed to parse recipe catalog: {}", e);
        CoreError::CatalogUnavailable(format!("{}: {}", path.display(), e))
    })
}

pub async fn write_recipes(path: &Path, recipes: &[Recipe]) -> Result<(), CoreError> {
    let bytes = serde_json::to_vec_pretty(recipes).map_err(|e| {
        CoreError::CatalogUnavailable(format!("failed to serialize catalog: {}", e))
    })?;

    tokio::fs::write(path, bytes).await.map_err(|e| {
        tracing::error!(path = %path.display(), "Failed to write recipe catalog: {}", e);
        CoreError::CatalogUnavailable(format!("{}: {}", path.display(), e))
    })
}
