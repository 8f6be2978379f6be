//! HTTP request and response types

pub mod error;
pub mod json;
pub mod prediction;

pub use error::{
    ApiError, ApiErrorResponse, ErrorDetail, FieldErrorDetail, LocSegment, MODEL_NOT_AVAILABLE,
    MODEL_NOT_LOADED,
};
pub use json::Json;
pub use prediction::{BatchPredictionResponse, PredictionResponse};
