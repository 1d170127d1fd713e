use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Suitability {
    #[serde(rename = "suitable")]
    Suitable,
    #[serde(rename = "not suitable")]
    NotSuitable,
}

impl Suitability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Suitability::Suitable => "suitable",
            Suitability::NotSuitable => "not suitable",
        }
    }
}

impl fmt::Display for Suitability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suitability decision for one recipe text against one condition set.
///
/// `score` is only meaningful for [`Suitability::Suitable`]; the
/// constructors keep it at `0.0` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Verdict {
    pub label: Suitability,
    pub score: f64,
    pub combined_condition: String,
}

impl Verdict {
    pub fn suitable(score: f64, combined_condition: String) -> Self {
        Self {
            label: Suitability::Suitable,
            score,
            combined_condition,
        }
    }

    pub fn not_suitable(combined_condition: String) -> Self {
        Self {
            label: Suitability::NotSuitable,
            score: 0.0,
            combined_condition,
        }
    }

    pub fn is_suitable(&self) -> bool {
        self.label == Suitability::Suitable
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DietPreference {
    Vegetarian,
    NonVegetarian,
}

impl DietPreference {
    pub const ALL: [DietPreference; 2] = [DietPreference::Vegetarian, DietPreference::NonVegetarian];

    /// Candidate label handed to the classifier for this diet.
    pub fn label(&self) -> &'static str {
        match self {
            DietPreference::Vegetarian => "vegetarian",
            DietPreference::NonVegetarian => "non-vegetarian",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|diet| diet.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for DietPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DietPreference {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| {
            CoreError::Invalid(format!(
                "unknown diet '{}', expected 'vegetarian' or 'non-vegetarian'",
                s
            ))
        })
    }
}

/// Raw answer of the zero-shot classifier: candidate labels ordered by
/// descending likelihood, with a parallel array of scores.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
}

impl Classification {
    pub fn new(labels: Vec<String>, scores: Vec<f64>) -> Self {
        Self { labels, scores }
    }

    pub fn top(&self) -> Option<(&str, f64)> {
        self.labels
            .first()
            .zip(self.scores.first())
            .map(|(label, score)| (label.as_str(), *score))
    }
}
