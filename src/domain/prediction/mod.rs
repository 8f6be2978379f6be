//! Prediction domain - Probability thresholds and scored outcomes

mod outcome;
mod risk;

pub use outcome::Prediction;
pub use risk::{
    PredictionPolicy, RiskLevel, DEFAULT_DECISION_THRESHOLD, DEFAULT_HIGH_RISK_THRESHOLD,
    DEFAULT_MEDIUM_RISK_THRESHOLD,
};
