use std::sync::Arc;

use crate::domain::{
    classification::{
        entities::{DietPreference, Verdict},
        flight::FlightGroup,
        ports::{ClassificationCache, ZeroShotClassifier},
    },
    common::FilterConfig,
    recipe::{policies::RecordPolicy, ports::RecipeCatalog},
};

/// Shared service context handed to every request handler.
///
/// Built once at startup and never reloaded. Cloning is cheap: every
/// collaborator sits behind an `Arc`, so clones share the same classifier
/// and the same caches.
pub struct Service<K, C, V, D>
where
    K: RecipeCatalog,
    C: ZeroShotClassifier,
    V: ClassificationCache<Verdict>,
    D: ClassificationCache<DietPreference>,
{
    pub(crate) recipe_catalog: Arc<K>,
    pub(crate) classifier: Arc<C>,
    pub(crate) verdict_cache: Arc<V>,
    pub(crate) diet_cache: Arc<D>,
    pub(crate) verdict_flights: Arc<FlightGroup>,
    pub(crate) diet_flights: Arc<FlightGroup>,
    pub(crate) record_policy: Arc<RecordPolicy>,
    pub(crate) filter: FilterConfig,
}

impl<K, C, V, D> Service<K, C, V, D>
where
    K: RecipeCatalog,
    C: ZeroShotClassifier,
    V: ClassificationCache<Verdict>,
    D: ClassificationCache<DietPreference>,
{
    pub fn new(
        recipe_catalog: K,
        classifier: C,
        verdict_cache: V,
        diet_cache: D,
        record_policy: RecordPolicy,
        filter: FilterConfig,
    ) -> Self {
        Self {
            recipe_catalog: Arc::new(recipe_catalog),
            classifier: Arc::new(classifier),
            verdict_cache: Arc::new(verdict_cache),
            diet_cache: Arc::new(diet_cache),
            verdict_flights: Arc::new(FlightGroup::new()),
            diet_flights: Arc::new(FlightGroup::new()),
            record_policy: Arc::new(record_policy),
            filter,
        }
    }
}

impl<K, C, V, D> Clone for Service<K, C, V, D>
where
    K: RecipeCatalog,
    C: ZeroShotClassifier,
    V: ClassificationCache<Verdict>,
    D: ClassificationCache<DietPreference>,
{
    fn clone(&self) -> Self {
        Self {
            recipe_catalog: Arc::clone(&self.recipe_catalog),
            classifier: Arc::clone(&self.classifier),
            verdict_cache: Arc::clone(&self.verdict_cache),
            diet_cache: Arc::clone(&self.diet_cache),
            verdict_flights: Arc::clone(&self.verdict_flights),
            diet_flights: Arc::clone(&self.diet_flights),
            record_policy: Arc::clone(&self.record_policy),
            filter: self.filter.clone(),
        }
    }
}
