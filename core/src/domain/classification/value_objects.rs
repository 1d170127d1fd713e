use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    classification::helpers::join_conditions, common::entities::app_errors::CoreError,
};

/// Strategy for turning several conditions into one verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluationMode {
    /// One classifier query for the whole condition phrase.
    Combined,
    /// One classifier query per condition; every condition must pass.
    #[default]
    PerCondition,
}

impl EvaluationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationMode::Combined => "combined",
            EvaluationMode::PerCondition => "per-condition",
        }
    }
}

impl fmt::Display for EvaluationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvaluationMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "combined" => Ok(EvaluationMode::Combined),
            "per-condition" | "per_condition" => Ok(EvaluationMode::PerCondition),
            other => Err(CoreError::InvalidConfiguration(format!(
                "unknown evaluation mode '{}'",
                other
            ))),
        }
    }
}

/// Normalized set of conditions: trimmed, blanks dropped, sorted, deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ConditionSet(Vec<String>);

impl ConditionSet {
    pub fn new<I, S>(conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut conditions: Vec<String> = conditions
            .into_iter()
            .map(|condition| condition.as_ref().trim().to_string())
            .filter(|condition| !condition.is_empty())
            .collect();
        conditions.sort();
        conditions.dedup();

        Self(conditions)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Human readable join, e.g. `"celiac disease, diabetes, and gout"`.
    pub fn phrase(&self) -> String {
        join_conditions(&self.0)
    }
}

impl fmt::Display for ConditionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.phrase())
    }
}

/// Cache key derived from a recipe text and a condition set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub(crate) fn from_digest(hex: String) -> Self {
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
