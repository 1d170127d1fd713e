use tracing::instrument;

use crate::domain::{
    classification::{
        entities::{DietPreference, Verdict},
        helpers::{diet_labels, ensure_candidates, fingerprint, suitability_labels},
        ports::{ClassificationCache, SuitabilityService, ZeroShotClassifier},
        value_objects::{ConditionSet, EvaluationMode},
    },
    common::{entities::app_errors::CoreError, services::Service},
    recipe::ports::RecipeCatalog,
};

impl<K, C, V, D> SuitabilityService for Service<K, C, V, D>
where
    K: RecipeCatalog,
    C: ZeroShotClassifier,
    V: ClassificationCache<Verdict>,
    D: ClassificationCache<DietPreference>,
{
    #[instrument(skip(self, text), fields(conditions = %conditions, mode = %self.filter.mode))]
    async fn evaluate_conditions(
        &self,
        text: &str,
        conditions: &ConditionSet,
    ) -> Result<Verdict, CoreError> {
        // Nothing to be proven suitable against.
        if conditions.is_empty() {
            return Ok(Verdict::not_suitable(String::new()));
        }

        let key = fingerprint(text, conditions.as_slice());
        self.verdict_flights
            .get_or_compute(self.verdict_cache.as_ref(), key, move || async move {
                match self.filter.mode {
                    EvaluationMode::Combined => self.classify_combined(text, conditions).await,
                    EvaluationMode::PerCondition => {
                        self.classify_per_condition(text, conditions).await
                    }
                }
            })
            .await
    }

    #[instrument(skip(self, text))]
    async fn evaluate_diet(
        &self,
        text: &str,
        diet: Option<DietPreference>,
    ) -> Result<bool, CoreError> {
        let Some(diet) = diet else {
            return Ok(true);
        };

        // The query does not depend on the requested diet, so one entry per
        // text serves both preferences.
        let labels = diet_labels();
        let key = fingerprint(text, &labels);
        let predicted = self
            .diet_flights
            .get_or_compute(self.diet_cache.as_ref(), key, move || {
                self.classify_diet(text, labels)
            })
            .await?;

        Ok(predicted == diet)
    }
}

impl<K, C, V, D> Service<K, C, V, D>
where
    K: RecipeCatalog,
    C: ZeroShotClassifier,
    V: ClassificationCache<Verdict>,
    D: ClassificationCache<DietPreference>,
{
    async fn classify_combined(
        &self,
        text: &str,
        conditions: &ConditionSet,
    ) -> Result<Verdict, CoreError> {
        let phrase = conditions.phrase();
        let (suitable, score) = self.ask_suitability(text, &phrase).await?;

        if suitable {
            Ok(Verdict::suitable(score, phrase))
        } else {
            Ok(Verdict::not_suitable(phrase))
        }
    }

    async fn classify_per_condition(
        &self,
        text: &str,
        conditions: &ConditionSet,
    ) -> Result<Verdict, CoreError> {
        let mut total_score = 0.0;

        for condition in conditions.iter() {
            let (suitable, score) = self.ask_suitability(text, condition).await?;
            if !suitable {
                tracing::debug!(condition = %condition, "condition rejected recipe");
                return Ok(Verdict::not_suitable(conditions.phrase()));
            }
            total_score += score;
        }

        Ok(Verdict::suitable(
            total_score / conditions.len() as f64,
            conditions.phrase(),
        ))
    }

    /// One classifier round trip: is the top label the "suitable" variant, and its score.
    async fn ask_suitability(&self, text: &str, subject: &str) -> Result<(bool, f64), CoreError> {
        let labels = suitability_labels(subject);
        let classification = self
            .classifier
            .classify(text.to_string(), labels.clone())
            .await?;
        ensure_candidates(&classification, &labels)?;

        let (top_label, score) = classification.top().ok_or_else(|| {
            CoreError::ExternalServiceError("classifier returned no labels".to_string())
        })?;

        Ok((top_label == labels[0], score))
    }

    async fn classify_diet(
        &self,
        text: &str,
        labels: Vec<String>,
    ) -> Result<DietPreference, CoreError> {
        let classification = self
            .classifier
            .classify(text.to_string(), labels.clone())
            .await?;
        ensure_candidates(&classification, &labels)?;

        classification
            .top()
            .and_then(|(label, _)| DietPreference::from_label(label))
            .ok_or_else(|| {
                CoreError::ExternalServiceError("classifier returned no diet label".to_string())
            })
    }
}
