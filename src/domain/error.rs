use thiserror::Error;

use super::customer::ValidationErrors;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    #[error("Model not available")]
    ModelUnavailable,

    #[error("Inference error: {message}")]
    Inference { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn inference(message: impl Into<String>) -> Self {
        Self::Inference {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_unavailable_error() {
        let error = DomainError::ModelUnavailable;
        assert_eq!(error.to_string(), "Model not available");
    }

    #[test]
    fn test_inference_error() {
        let error = DomainError::inference("probability is NaN");
        assert_eq!(error.to_string(), "Inference error: probability is NaN");
    }

    #[test]
    fn test_configuration_error() {
        let error = DomainError::configuration("high threshold below medium");
        assert_eq!(
            error.to_string(),
            "Configuration error: high threshold below medium"
        );
    }
}
