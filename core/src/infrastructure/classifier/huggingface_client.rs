use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::{
    classification::{
        entities::Classification, helpers::ensure_candidates, ports::ZeroShotClassifier,
    },
    common::{ClassifierConfig, entities::app_errors::CoreError},
};

/// Zero-shot classifier backed by a Hugging Face inference endpoint
/// (`POST {base_url}/models/{model}`).
#[derive(Debug, Clone)]
pub struct HuggingFaceClassifier {
    endpoint: String,
    api_token: Option<String>,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Debug, Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [String],
    multi_label: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZeroShotResponse {
    Ranked {
        labels: Vec<String>,
        scores: Vec<f64>,
    },
    Scored(Vec<LabelScore>),
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

impl From<ZeroShotResponse> for Classification {
    fn from(response: ZeroShotResponse) -> Self {
        match response {
            ZeroShotResponse::Ranked { labels, scores } => Classification::new(labels, scores),
            ZeroShotResponse::Scored(mut entries) => {
                entries.sort_by(|a, b| b.score.total_cmp(&a.score));
                let (labels, scores) = entries
                    .into_iter()
                    .map(|entry| (entry.label, entry.score))
                    .unzip();
                Classification::new(labels, scores)
            }
        }
    }
}

impl HuggingFaceClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                CoreError::InvalidConfiguration(format!("failed to build HTTP client: {}", e))
            })?;

        let endpoint = format!(
            "{}/models/{}",
            config.base_url.trim_end_matches('/'),
            config.model
        );

        tracing::info!(endpoint = %endpoint, "Initializing zero-shot classifier client");

        Ok(Self {
            endpoint,
            api_token: config.api_token.filter(|token| !token.is_empty()),
            client,
        })
    }

    /// Issues one throwaway classification so that an unreachable endpoint
    /// or a model that fails to load is caught before serving.
    pub async fn probe(&self) -> Result<(), CoreError> {
        let labels = vec!["ready".to_string(), "not ready".to_string()];
        let classification = self
            .classify("readiness probe".to_string(), labels.clone())
            .await?;
        ensure_candidates(&classification, &labels)?;

        tracing::info!(endpoint = %self.endpoint, "Zero-shot classifier is ready");
        Ok(())
    }
}

impl ZeroShotClassifier for HuggingFaceClassifier {
    #[instrument(skip(self, text), fields(endpoint = %self.endpoint))]
    async fn classify(
        &self,
        text: String,
        candidate_labels: Vec<String>,
    ) -> Result<Classification, CoreError> {
        let request = ZeroShotRequest {
            inputs: &text,
            parameters: ZeroShotParameters {
                candidate_labels: &candidate_labels,
                multi_label: false,
            },
        };

        let mut builder = self
            .client
            .post(&self.endpoint)
            .header("x-wait-for-model", "true")
            .json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!("Classifier request failed: {}", e);
            CoreError::ExternalServiceError(format!("classifier request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Classifier error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "classifier returned error: {} - {}",
                status, error_text
            )));
        }

        let parsed: ZeroShotResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse classifier response: {}", e);
            CoreError::ExternalServiceError(format!("failed to parse classifier response: {}", e))
        })?;

        Ok(parsed.into())
    }
}
