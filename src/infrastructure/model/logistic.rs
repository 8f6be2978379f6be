//! Logistic regression classifier

use serde::{Deserialize, Serialize};

use crate::domain::{ChurnClassifier, DomainError, FeatureVector, FEATURE_COUNT};

/// Per-feature standardization applied before the linear term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// `p = sigmoid(intercept + sum(coef_i * (x_i - mean_i) / scale_i))`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<StandardScaler>,
}

impl LogisticRegression {
    pub fn validate(&self) -> Result<(), String> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(format!(
                "expected {} coefficients, found {}",
                FEATURE_COUNT,
                self.coefficients.len()
            ));
        }

        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("coefficients and intercept must be finite".to_string());
        }

        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != FEATURE_COUNT || scaler.scale.len() != FEATURE_COUNT {
                return Err(format!(
                    "scaler must have {} means and {} scales",
                    FEATURE_COUNT, FEATURE_COUNT
                ));
            }

            if scaler.scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
                return Err("scaler scales must be finite and non-zero".to_string());
            }
        }

        Ok(())
    }

    fn decision_function(&self, features: &FeatureVector) -> f64 {
        let values = features.as_slice();
        let linear: f64 = match &self.scaler {
            Some(scaler) => values
                .iter()
                .zip(&self.coefficients)
                .zip(scaler.mean.iter().zip(&scaler.scale))
                .map(|((x, coef), (mean, scale))| coef * (x - mean) / scale)
                .sum(),
            None => values
                .iter()
                .zip(&self.coefficients)
                .map(|(x, coef)| coef * x)
                .sum(),
        };

        self.intercept + linear
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl ChurnClassifier for LogisticRegression {
    fn predict_proba(&self, features: &FeatureVector) -> Result<f64, DomainError> {
        let probability = sigmoid(self.decision_function(features));

        if probability.is_nan() {
            return Err(DomainError::inference("logistic regression produced NaN"));
        }

        Ok(probability)
    }
}
