//! Probability thresholds: churn label and risk bucket

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

pub const DEFAULT_DECISION_THRESHOLD: f64 = 0.5;
pub const DEFAULT_MEDIUM_RISK_THRESHOLD: f64 = 0.3;
pub const DEFAULT_HIGH_RISK_THRESHOLD: f64 = 0.7;

/// Coarse bucketing of churn probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cut points applied to a churn probability.
///
/// Every interval is closed below and open above: `p < medium` is Low,
/// `medium <= p < high` is Medium, `p >= high` is High, and the label is 1
/// when `p >= decision`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionPolicy {
    decision_threshold: f64,
    medium_risk_threshold: f64,
    high_risk_threshold: f64,
}

impl PredictionPolicy {
    pub fn new(
        decision_threshold: f64,
        medium_risk_threshold: f64,
        high_risk_threshold: f64,
    ) -> Result<Self, DomainError> {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);

        if !in_unit(decision_threshold) {
            return Err(DomainError::configuration(format!(
                "decision threshold {} must be between 0 and 1",
                decision_threshold
            )));
        }

        if !in_unit(medium_risk_threshold) || !in_unit(high_risk_threshold) {
            return Err(DomainError::configuration(format!(
                "risk thresholds {} and {} must be between 0 and 1",
                medium_risk_threshold, high_risk_threshold
            )));
        }

        if medium_risk_threshold > high_risk_threshold {
            return Err(DomainError::configuration(format!(
                "medium risk threshold {} exceeds high risk threshold {}",
                medium_risk_threshold, high_risk_threshold
            )));
        }

        Ok(Self {
            decision_threshold,
            medium_risk_threshold,
            high_risk_threshold,
        })
    }

    pub fn decision_threshold(&self) -> f64 {
        self.decision_threshold
    }

    pub fn medium_risk_threshold(&self) -> f64 {
        self.medium_risk_threshold
    }

    pub fn high_risk_threshold(&self) -> f64 {
        self.high_risk_threshold
    }

    /// Binary churn label
    pub fn label(&self, probability: f64) -> u8 {
        u8::from(probability >= self.decision_threshold)
    }

    pub fn risk_level(&self, probability: f64) -> RiskLevel {
        if probability < self.medium_risk_threshold {
            RiskLevel::Low
        } else if probability < self.high_risk_threshold {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

impl Default for PredictionPolicy {
    fn default() -> Self {
        Self {
            decision_threshold: DEFAULT_DECISION_THRESHOLD,
            medium_risk_threshold: DEFAULT_MEDIUM_RISK_THRESHOLD,
            high_risk_threshold: DEFAULT_HIGH_RISK_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_boundaries() {
        let policy = PredictionPolicy::default();

        assert_eq!(policy.risk_level(0.0), RiskLevel::Low);
        assert_eq!(policy.risk_level(0.2), RiskLevel::Low);
        assert_eq!(policy.risk_level(0.299_999), RiskLevel::Low);
        assert_eq!(policy.risk_level(0.3), RiskLevel::Medium);
        assert_eq!(policy.risk_level(0.5), RiskLevel::Medium);
        assert_eq!(policy.risk_level(0.699_999), RiskLevel::Medium);
        assert_eq!(policy.risk_level(0.7), RiskLevel::High);
        assert_eq!(policy.risk_level(0.8), RiskLevel::High);
        assert_eq!(policy.risk_level(1.0), RiskLevel::High);
    }

    #[test]
    fn test_label_threshold() {
        let policy = PredictionPolicy::default();

        assert_eq!(policy.label(0.0), 0);
        assert_eq!(policy.label(0.2), 0);
        assert_eq!(policy.label(0.499_999), 0);
        assert_eq!(policy.label(0.5), 1);
        assert_eq!(policy.label(0.7), 1);
        assert_eq!(policy.label(1.0), 1);
    }

    #[test]
    fn test_custom_policy() {
        let policy = PredictionPolicy::new(0.4, 0.25, 0.6).unwrap();

        assert_eq!(policy.label(0.45), 1);
        assert_eq!(policy.risk_level(0.25), RiskLevel::Medium);
        assert_eq!(policy.risk_level(0.6), RiskLevel::High);
    }

    #[test]
    fn test_invalid_policies() {
        assert!(PredictionPolicy::new(1.5, 0.3, 0.7).is_err());
        assert!(PredictionPolicy::new(0.5, -0.1, 0.7).is_err());
        assert!(PredictionPolicy::new(0.5, 0.3, 1.1).is_err());
        assert!(PredictionPolicy::new(0.5, 0.8, 0.7).is_err());
        assert!(PredictionPolicy::new(f64::NAN, 0.3, 0.7).is_err());
    }

    #[test]
    fn test_risk_level_serialization() {
        assert_eq!(serde_json::to_string(&RiskLevel::Low).unwrap(), "\"Low\"");
        assert_eq!(serde_json::to_string(&RiskLevel::Medium).unwrap(), "\"Medium\"");
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"High\"");
        assert_eq!(RiskLevel::High.to_string(), "High");
    }
}
