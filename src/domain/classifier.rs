//! Classifier abstraction consumed by the prediction service

#[cfg(test)]
use mockall::automock;

use super::customer::FeatureVector;
use super::error::DomainError;

/// A loaded binary churn classifier.
///
/// Inference is synchronous and in-memory.
#[cfg_attr(test, automock)]
pub trait ChurnClassifier: Send + Sync {
    /// Probability of the positive (churn) class
    fn predict_proba(&self, features: &FeatureVector) -> Result<f64, DomainError>;
}
