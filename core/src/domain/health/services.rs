use crate::domain::{
    classification::{
        entities::{DietPreference, Verdict},
        ports::{ClassificationCache, ZeroShotClassifier},
    },
    common::services::Service,
    health::{entities::CatalogHealthStatus, ports::HealthCheckService},
    recipe::ports::RecipeCatalog,
};

impl<K, C, V, D> HealthCheckService for Service<K, C, V, D>
where
    K: RecipeCatalog,
    C: ZeroShotClassifier,
    V: ClassificationCache<Verdict>,
    D: ClassificationCache<DietPreference>,
{
    fn readiness(&self) -> CatalogHealthStatus {
        let recipes = self.recipe_catalog.recipes();

        CatalogHealthStatus {
            recipes: recipes.len(),
            servable_recipes: recipes
                .iter()
                .filter(|recipe| self.record_policy.is_servable(recipe))
                .count(),
            cached_verdicts: self.verdict_cache.len(),
            cached_diets: self.diet_cache.len(),
            evaluation_mode: self.filter.mode,
            min_score: self.filter.min_score,
        }
    }
}
