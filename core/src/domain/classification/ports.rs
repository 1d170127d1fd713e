use std::future::Future;

use crate::domain::{
    classification::{
        entities::{Classification, DietPreference, Verdict},
        value_objects::{ConditionSet, Fingerprint},
    },
    common::entities::app_errors::CoreError,
};

/// Zero-shot text classifier scoring candidate labels against a text.
pub trait ZeroShotClassifier: Send + Sync {
    /// Returns `candidate_labels` reordered by descending likelihood with a
    /// parallel array of scores in `[0, 1]`.
    fn classify(
        &self,
        text: String,
        candidate_labels: Vec<String>,
    ) -> impl Future<Output = Result<Classification, CoreError>> + Send;
}

/// Memo of classification outcomes keyed by [`Fingerprint`].
#[cfg_attr(test, mockall::automock)]
pub trait ClassificationCache<T>: Send + Sync
where
    T: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &Fingerprint) -> Option<T>;

    fn put(&self, key: Fingerprint, value: T);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Service trait for recipe suitability decisions
pub trait SuitabilityService: Send + Sync {
    fn evaluate_conditions(
        &self,
        text: &str,
        conditions: &ConditionSet,
    ) -> impl Future<Output = Result<Verdict, CoreError>> + Send;

    /// `true` when no diet is requested or the classifier agrees with it.
    fn evaluate_diet(
        &self,
        text: &str,
        diet: Option<DietPreference>,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;
}
