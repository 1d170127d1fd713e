use std::path::PathBuf;
use std::time::Duration;

use crate::domain::classification::value_objects::EvaluationMode;

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct NutrifilterConfig {
    pub catalog: CatalogConfig,
    pub classifier: ClassifierConfig,
    pub filter: FilterConfig,
}

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub path: PathBuf,
    /// Titles the scraper emits for pages that no longer exist.
    pub placeholder_titles: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct ClassifierConfig {
    pub base_url: String,
    pub model: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct FilterConfig {
    pub mode: EvaluationMode,
    pub min_score: f64,
    pub request_timeout: Duration,
    /// Upper bound on recipes evaluated against the classifier at once.
    pub classifier_concurrency: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            mode: EvaluationMode::default(),
            min_score: 0.0,
            request_timeout: Duration::from_secs(300),
            classifier_concurrency: 1,
        }
    }
}
