//! Health check endpoints

use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::state::AppState;
use super::types::{ApiError, Json, MODEL_NOT_LOADED};
use crate::infrastructure::model::ModelSlot;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub model_loaded: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthResponse {
    pub fn from_slot(models: &ModelSlot) -> Self {
        let model_loaded = models.is_loaded();

        Self {
            status: if model_loaded {
                HealthStatus::Healthy
            } else {
                HealthStatus::Unhealthy
            },
            model_loaded,
        }
    }
}

/// Readiness: 200 when a model is loaded, 503 otherwise
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, ApiError> {
    let health = HealthResponse::from_slot(&state.models);

    if health.status == HealthStatus::Unhealthy {
        debug!(model_loaded = health.model_loaded, "Health check failed");
        return Err(ApiError::unavailable(MODEL_NOT_LOADED));
    }

    Ok(Json(health))
}

/// Liveness check - the process is up, regardless of model state
pub async fn live_check() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockChurnClassifier;
    use crate::infrastructure::model::{LoadedModel, ModelKind, ModelMetadata};

    #[test]
    fn test_health_status_serialization() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
        assert_eq!(
            serde_json::to_string(&HealthStatus::Unhealthy).unwrap(),
            "\"unhealthy\""
        );
    }

    #[test]
    fn test_health_follows_model_slot() {
        let slot = ModelSlot::empty();
        let health = HealthResponse::from_slot(&slot);

        assert_eq!(health.status, HealthStatus::Unhealthy);
        assert!(!health.model_loaded);

        slot.install(LoadedModel::new(
            Box::new(MockChurnClassifier::new()),
            ModelMetadata::new("mock", ModelKind::RandomForest, "memory"),
        ));
        let health = HealthResponse::from_slot(&slot);

        assert_eq!(health.status, HealthStatus::Healthy);
        assert!(health.model_loaded);
    }

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: HealthStatus::Healthy,
            model_loaded: true,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"status":"healthy","model_loaded":true}"#);
    }
}
