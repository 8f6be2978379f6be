//! Prediction endpoint handlers
//!
//! Each request is validated first, then gated on the model slot, then
//! scored: invalid bodies get 422 even when no model is loaded, and a
//! missing model gets 503.

use axum::extract::State;
use serde_json::Value;
use tracing::debug;

use super::state::AppState;
use super::types::{ApiError, BatchPredictionResponse, Json, PredictionResponse};
use crate::domain::{validate_batch, validate_record, DomainError};

/// POST /predict
pub async fn predict(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let features = validate_record(&body).map_err(DomainError::from)?;
    let model = state.require_model()?;

    let prediction = state
        .prediction_service
        .predict(model.classifier(), &features)?;

    debug!(
        credit_score = features.credit_score(),
        risk_level = %prediction.risk_level(),
        "Prediction served"
    );

    Ok(Json(PredictionResponse::from_domain(&prediction)))
}

/// POST /predict/batch
pub async fn predict_batch(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<BatchPredictionResponse>, ApiError> {
    let customers = validate_batch(&body).map_err(DomainError::from)?;
    let model = state.require_model()?;

    let predictions = state
        .prediction_service
        .predict_batch(model.classifier(), &customers)?;

    debug!(count = predictions.len(), "Batch prediction served");

    Ok(Json(BatchPredictionResponse::from_domain(&predictions)))
}
