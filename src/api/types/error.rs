//! HTTP error bodies
//!
//! Every error response has the shape `{"detail": ...}`. The detail is a
//! plain message, or for validation failures a list of located field
//! errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, FieldViolation, ValidationErrors};

pub const MODEL_NOT_AVAILABLE: &str = "Model not available";
pub const MODEL_NOT_LOADED: &str = "Model not loaded";

/// One segment of an error location: a field name or a batch position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocSegment {
    Field(String),
    Index(usize),
}

/// A located validation error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldErrorDetail {
    pub loc: Vec<LocSegment>,
    pub msg: String,
    #[serde(rename = "type")]
    pub error_type: String,
}

impl FieldErrorDetail {
    /// Error located at the request body itself
    pub fn body(msg: impl Into<String>, error_type: impl Into<String>) -> Self {
        Self {
            loc: vec![LocSegment::Field("body".to_string())],
            msg: msg.into(),
            error_type: error_type.into(),
        }
    }

    pub fn from_violation(violation: &FieldViolation) -> Self {
        let mut detail = Self::body(violation.kind.to_string(), violation.kind.code());

        if let Some(index) = violation.index {
            detail.loc.push(LocSegment::Index(index));
        }

        if let Some(field) = violation.field {
            detail.loc.push(LocSegment::Field(field.to_string()));
        }

        detail
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Fields(Vec<FieldErrorDetail>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub detail: ErrorDetail,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: ErrorDetail) -> Self {
        Self {
            status,
            response: ApiErrorResponse { detail },
        }
    }

    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, ErrorDetail::Message(message.into()))
    }

    /// 422 with located field errors
    pub fn unprocessable(errors: Vec<FieldErrorDetail>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, ErrorDetail::Fields(errors))
    }

    pub fn validation(errors: &ValidationErrors) -> Self {
        Self::unprocessable(
            errors
                .violations()
                .iter()
                .map(FieldErrorDetail::from_violation)
                .collect(),
        )
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::message(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::message(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::message(StatusCode::SERVICE_UNAVAILABLE, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::Validation(errors) => Self::validation(errors),
            DomainError::ModelUnavailable => Self::unavailable(MODEL_NOT_AVAILABLE),
            DomainError::Inference { .. } => {
                tracing::error!(error = %err, "Prediction failed");
                Self::internal(err.to_string())
            }
            DomainError::Configuration { message } => Self::internal(message),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.response.detail {
            ErrorDetail::Message(message) => write!(f, "{}: {}", self.status, message),
            ErrorDetail::Fields(fields) => {
                write!(f, "{}: {} field error(s)", self.status, fields.len())
            }
        }
    }
}

impl std::error::Error for ApiError {}
