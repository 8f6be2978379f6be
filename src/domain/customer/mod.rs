//! Customer domain - Input record schema and validation

mod features;
mod validation;

pub use features::{
    feature_names, CustomerFeatures, FeatureVector, FieldRule, FieldType, CREDIT_SCORE,
    FEATURE_COUNT, FIELD_RULES, GEOGRAPHY_GERMANY, GEOGRAPHY_SPAIN,
};
pub use validation::{
    validate_batch, validate_record, FieldViolation, ValidationErrors, ViolationKind,
};
