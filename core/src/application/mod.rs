use crate::{
    domain::{
        classification::entities::{DietPreference, Verdict},
        common::{NutrifilterConfig, entities::app_errors::CoreError, services::Service},
        recipe::policies::RecordPolicy,
    },
    infrastructure::{
        cache::InMemoryCache, catalog::JsonRecipeCatalog, classifier::HuggingFaceClassifier,
    },
};

pub type NutrifilterService = Service<
    JsonRecipeCatalog,
    HuggingFaceClassifier,
    InMemoryCache<Verdict>,
    InMemoryCache<DietPreference>,
>;

/// Loads the catalog, connects the classifier and confirms it answers.
///
/// Any failure here is fatal: the service never starts half-configured.
pub async fn create_service(config: NutrifilterConfig) -> Result<NutrifilterService, CoreError> {
    validate_config(&config)?;

    let recipe_catalog = JsonRecipeCatalog::load(&config.catalog.path).await?;

    let classifier = HuggingFaceClassifier::new(config.classifier.clone())?;
    classifier.probe().await?;

    let record_policy = RecordPolicy::new(config.catalog.placeholder_titles.iter());

    tracing::info!(
        mode = %config.filter.mode,
        min_score = config.filter.min_score,
        concurrency = config.filter.classifier_concurrency,
        "Nutrifilter service ready"
    );

    Ok(Service::new(
        recipe_catalog,
        classifier,
        InMemoryCache::new(),
        InMemoryCache::new(),
        record_policy,
        config.filter,
    ))
}

fn validate_config(config: &NutrifilterConfig) -> Result<(), CoreError> {
    if config.filter.classifier_concurrency == 0 {
        return Err(CoreError::InvalidConfiguration(
            "classifier concurrency must be at least 1".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&config.filter.min_score) {
        return Err(CoreError::InvalidConfiguration(format!(
            "min score {} is outside [0, 1]",
            config.filter.min_score
        )));
    }
    if config.filter.request_timeout.is_zero() {
        return Err(CoreError::InvalidConfiguration(
            "request timeout must be greater than zero".to_string(),
        ));
    }
    if config.classifier.timeout.is_zero() {
        return Err(CoreError::InvalidConfiguration(
            "classifier timeout must be greater than zero".to_string(),
        ));
    }

    Ok(())
}
