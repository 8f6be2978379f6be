//! Prediction request and response bodies

use serde::{Deserialize, Serialize};

use crate::domain::{Prediction, RiskLevel};

/// Response for a single scored customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub churn_probability: f64,
    pub prediction: u8,
    pub risk_level: RiskLevel,
}

impl PredictionResponse {
    pub fn from_domain(prediction: &Prediction) -> Self {
        Self {
            churn_probability: prediction.probability(),
            prediction: prediction.label(),
            risk_level: prediction.risk_level(),
        }
    }
}

/// Response for `/predict/batch`; `count` always equals `predictions.len()`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchPredictionResponse {
    pub predictions: Vec<PredictionResponse>,
    pub count: usize,
}

impl BatchPredictionResponse {
    pub fn from_domain(predictions: &[Prediction]) -> Self {
        let predictions: Vec<PredictionResponse> =
            predictions.iter().map(PredictionResponse::from_domain).collect();

        Self {
            count: predictions.len(),
            predictions,
        }
    }
}
