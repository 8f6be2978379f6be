//! Result of scoring one customer

use super::risk::{PredictionPolicy, RiskLevel};
use crate::domain::DomainError;

/// Churn probability with the label and risk bucket derived from it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    probability: f64,
    label: u8,
    risk_level: RiskLevel,
}

impl Prediction {
    /// Derive label and risk level from a single probability so the three
    /// values can never disagree.
    pub fn from_probability(
        probability: f64,
        policy: &PredictionPolicy,
    ) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(DomainError::inference(format!(
                "model returned probability {} outside [0, 1]",
                probability
            )));
        }

        Ok(Self {
            probability,
            label: policy.label(probability),
            risk_level: policy.risk_level(probability),
        })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn label(&self) -> u8 {
        self.label
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    pub fn will_churn(&self) -> bool {
        self.label == 1
    }
}
