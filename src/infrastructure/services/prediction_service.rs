//! Prediction service - Scores validated customers with a loaded classifier

use tracing::debug;

use crate::domain::{ChurnClassifier, CustomerFeatures, DomainError, Prediction, PredictionPolicy};
use crate::infrastructure::observability::{record_batch_size, record_prediction};

/// Turns classifier probabilities into labelled, bucketed predictions
#[derive(Debug, Clone, Default)]
pub struct PredictionService {
    policy: PredictionPolicy,
}

impl PredictionService {
    pub fn new(policy: PredictionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PredictionPolicy {
        &self.policy
    }

    /// Score one customer
    pub fn predict(
        &self,
        classifier: &dyn ChurnClassifier,
        features: &CustomerFeatures,
    ) -> Result<Prediction, DomainError> {
        let vector = features.to_feature_vector();
        let probability = classifier.predict_proba(&vector)?;
        let prediction = Prediction::from_probability(probability, &self.policy)?;

        debug!(
            probability = prediction.probability(),
            label = prediction.label(),
            risk_level = %prediction.risk_level(),
            "Customer scored"
        );
        record_prediction(prediction.risk_level());

        Ok(prediction)
    }

    /// Score customers in order; the first inference failure aborts the batch
    pub fn predict_batch(
        &self,
        classifier: &dyn ChurnClassifier,
        customers: &[CustomerFeatures],
    ) -> Result<Vec<Prediction>, DomainError> {
        record_batch_size(customers.len());

        customers
            .iter()
            .map(|features| self.predict(classifier, features))
            .collect()
    }
}
