//! On-disk model artifact format
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "name": "churn-logreg",
//!   "feature_names": ["CreditScore", "Age", ...],
//!   "model": { "kind": "logistic_regression", "coefficients": [...], "intercept": -1.2 }
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::forest::RandomForest;
use super::logistic::LogisticRegression;
use crate::domain::{feature_names, ChurnClassifier};

pub const SUPPORTED_FORMAT_VERSION: u32 = 1;

/// Classifier family stored in an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    LogisticRegression,
    RandomForest,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LogisticRegression => write!(f, "logistic_regression"),
            Self::RandomForest => write!(f, "random_forest"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    LogisticRegression(LogisticRegression),
    RandomForest(RandomForest),
}

impl ModelSpec {
    pub fn kind(&self) -> ModelKind {
        match self {
            Self::LogisticRegression(_) => ModelKind::LogisticRegression,
            Self::RandomForest(_) => ModelKind::RandomForest,
        }
    }
}

/// Serialized classifier together with the feature order it was trained on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub name: String,
    pub feature_names: Vec<String>,
    pub model: ModelSpec,
}

impl ModelArtifact {
    pub fn validate(&self) -> Result<(), String> {
        if self.format_version != SUPPORTED_FORMAT_VERSION {
            return Err(format!(
                "unsupported format_version {} (expected {})",
                self.format_version, SUPPORTED_FORMAT_VERSION
            ));
        }

        let expected = feature_names();
        if self.feature_names.len() != expected.len()
            || self.feature_names.iter().zip(expected).any(|(a, b)| a != b)
        {
            return Err(format!(
                "feature_names {:?} do not match expected order {:?}",
                self.feature_names, expected
            ));
        }

        match &self.model {
            ModelSpec::LogisticRegression(model) => model.validate(),
            ModelSpec::RandomForest(model) => model.validate(),
        }
    }

    pub fn kind(&self) -> ModelKind {
        self.model.kind()
    }

    pub fn into_classifier(self) -> Box<dyn ChurnClassifier> {
        match self.model {
            ModelSpec::LogisticRegression(model) => Box::new(model),
            ModelSpec::RandomForest(model) => Box::new(model),
        }
    }
}
