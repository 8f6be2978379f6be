//! Domain layer - Core business logic and entities

pub mod classifier;
pub mod customer;
pub mod error;
pub mod prediction;

pub use classifier::ChurnClassifier;
#[cfg(test)]
pub use classifier::MockChurnClassifier;
pub use customer::{
    feature_names, validate_batch, validate_record, CustomerFeatures, FeatureVector,
    FieldViolation, ValidationErrors, ViolationKind, FEATURE_COUNT,
};
pub use error::DomainError;
pub use prediction::{Prediction, PredictionPolicy, RiskLevel};
