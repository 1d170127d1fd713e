use futures::{StreamExt, TryStreamExt, stream};
use tracing::instrument;

use crate::domain::{
    classification::{
        entities::{DietPreference, Verdict},
        ports::{ClassificationCache, SuitabilityService, ZeroShotClassifier},
        value_objects::ConditionSet,
    },
    common::{entities::app_errors::CoreError, services::Service},
    recipe::{
        entities::{Recipe, RecipeMatch},
        ports::{RecipeCatalog, RecipeService},
        value_objects::FilterRecipesInput,
    },
};

impl<K, C, V, D> RecipeService for Service<K, C, V, D>
where
    K: RecipeCatalog,
    C: ZeroShotClassifier,
    V: ClassificationCache<Verdict>,
    D: ClassificationCache<DietPreference>,
{
    #[instrument(skip(self, input), fields(conditions = input.conditions.len(), diet = ?input.diet))]
    async fn filter_recipes(&self, input: FilterRecipesInput) -> Result<Vec<RecipeMatch>, CoreError> {
        if let Some(min_score) = input
            .min_score
            .filter(|score| !(0.0..=1.0).contains(score))
        {
            return Err(CoreError::Invalid(format!(
                "min_score {} is outside [0, 1]",
                min_score
            )));
        }

        let timeout = self.filter.request_timeout;

        tokio::time::timeout(timeout, self.rank_catalog(input))
            .await
            .map_err(|_| {
                tracing::warn!(timeout_secs = timeout.as_secs(), "recipe filtering timed out");
                CoreError::Timeout(timeout.as_secs())
            })?
    }
}

impl<K, C, V, D> Service<K, C, V, D>
where
    K: RecipeCatalog,
    C: ZeroShotClassifier,
    V: ClassificationCache<Verdict>,
    D: ClassificationCache<DietPreference>,
{
    async fn rank_catalog(&self, input: FilterRecipesInput) -> Result<Vec<RecipeMatch>, CoreError> {
        let conditions = ConditionSet::new(&input.conditions);
        let threshold = input.min_score.unwrap_or(self.filter.min_score);
        let diet = input.diet;

        if conditions.is_empty() {
            tracing::debug!("no conditions given, nothing can be suitable");
            return Ok(Vec::new());
        }

        let recipes = self.recipe_catalog.recipes();
        let mut candidates = Vec::with_capacity(recipes.len());
        for recipe in recipes.iter() {
            match self.record_policy.rejection(recipe) {
                Some(reason) => {
                    tracing::debug!(source_link = %recipe.source_link, %reason, "skipping recipe");
                }
                None => candidates.push(recipe),
            }
        }

        let pending: Vec<_> = candidates
            .into_iter()
            .map(|recipe| self.assess(recipe, &conditions, diet, threshold))
            .collect();
        let evaluated = pending.len();

        // `buffered` yields in submission order, so ties keep catalog order.
        let outcomes: Vec<Option<RecipeMatch>> = stream::iter(pending)
            .buffered(self.filter.classifier_concurrency.max(1))
            .try_collect()
            .await?;

        let mut matches: Vec<RecipeMatch> = outcomes.into_iter().flatten().collect();
        rank_matches(&mut matches);

        tracing::info!(
            catalog = recipes.len(),
            evaluated,
            matched = matches.len(),
            conditions = %conditions,
            threshold,
            "recipe filtering complete"
        );

        Ok(matches)
    }

    async fn assess(
        &self,
        recipe: &Recipe,
        conditions: &ConditionSet,
        diet: Option<DietPreference>,
        threshold: f64,
    ) -> Result<Option<RecipeMatch>, CoreError> {
        let Some(text) = recipe.summary() else {
            return Ok(None);
        };

        let verdict = self.evaluate_conditions(text, conditions).await?;
        if !verdict.is_suitable() || verdict.score < threshold {
            return Ok(None);
        }

        if !self.evaluate_diet(text, diet).await? {
            return Ok(None);
        }

        Ok(Some(RecipeMatch::new(recipe.clone(), &verdict)))
    }
}

/// Highest score first; the sort is stable so equal scores keep catalog order.
pub fn rank_matches(matches: &mut [RecipeMatch]) {
    matches.sort_by(|a, b| b.classification_score.total_cmp(&a.classification_score));
}
