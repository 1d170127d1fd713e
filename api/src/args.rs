use std::path::PathBuf;
use std::time::Duration;

use clap::{Args as ClapArgs, Parser};
use nutrifilter_core::domain::{
    classification::value_objects::EvaluationMode,
    common::{CatalogConfig, ClassifierConfig, FilterConfig, NutrifilterConfig},
    recipe::policies::DEFAULT_PLACEHOLDER_TITLES,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "nutrifilter-api", version, about = "Recipe suitability filtering API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    #[command(flatten)]
    pub classifier: ClassifierArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix mounted in front of every route, e.g. `/api`.
    #[arg(long, env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "*"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct CatalogArgs {
    #[arg(long, env = "CATALOG_PATH", default_value = "recipes_with_summary.json")]
    pub catalog_path: PathBuf,

    /// Titles marking scraped pages that no longer exist.
    #[arg(
        long,
        env = "PLACEHOLDER_TITLES",
        value_delimiter = ';',
        default_values = DEFAULT_PLACEHOLDER_TITLES
    )]
    pub placeholder_titles: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ClassifierArgs {
    #[arg(
        long,
        env = "CLASSIFIER_URL",
        default_value = "https://router.huggingface.co/hf-inference"
    )]
    pub classifier_url: String,

    #[arg(long, env = "CLASSIFIER_MODEL", default_value = "facebook/bart-large-mnli")]
    pub classifier_model: String,

    #[arg(long, env = "CLASSIFIER_API_TOKEN", hide_env_values = true)]
    pub classifier_api_token: Option<String>,

    #[arg(long, env = "CLASSIFIER_TIMEOUT_SECS", default_value_t = 60)]
    pub classifier_timeout_secs: u64,

    /// Recipes evaluated against the classifier at the same time.
    #[arg(long, env = "CLASSIFIER_CONCURRENCY", default_value_t = 1)]
    pub classifier_concurrency: usize,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct FilterArgs {
    #[arg(long, env = "EVALUATION_MODE", default_value_t = EvaluationMode::PerCondition)]
    pub evaluation_mode: EvaluationMode,

    #[arg(long, env = "MIN_SCORE", default_value_t = 0.0)]
    pub min_score: f64,

    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 300)]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    /// Emit logs as JSON lines instead of human readable text.
    #[arg(long, env = "LOG_JSON", default_value_t = false)]
    pub log_json: bool,

    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,
}

impl From<Args> for NutrifilterConfig {
    fn from(args: Args) -> Self {
        NutrifilterConfig {
            catalog: CatalogConfig {
                path: args.catalog.catalog_path,
                placeholder_titles: args.catalog.placeholder_titles,
            },
            classifier: ClassifierConfig {
                base_url: args.classifier.classifier_url,
                model: args.classifier.classifier_model,
                api_token: args.classifier.classifier_api_token,
                timeout: Duration::from_secs(args.classifier.classifier_timeout_secs),
            },
            filter: FilterConfig {
                mode: args.filter.evaluation_mode,
                min_score: args.filter.min_score,
                request_timeout: Duration::from_secs(args.filter.request_timeout_secs),
                classifier_concurrency: args.classifier.classifier_concurrency,
            },
        }
    }
}
