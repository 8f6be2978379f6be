//! Application state shared by all handlers

use std::sync::Arc;

use crate::domain::DomainError;
use crate::infrastructure::model::{LoadedModel, ModelSlot};
use crate::infrastructure::services::PredictionService;

/// Explicitly constructed request context: the model slot and the
/// prediction service, injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub models: Arc<ModelSlot>,
    pub prediction_service: Arc<PredictionService>,
}

impl AppState {
    pub fn new(models: Arc<ModelSlot>, prediction_service: Arc<PredictionService>) -> Self {
        Self {
            models,
            prediction_service,
        }
    }

    /// Snapshot of the loaded model, or `ModelUnavailable`
    pub fn require_model(&self) -> Result<Arc<LoadedModel>, DomainError> {
        self.models.current().ok_or(DomainError::ModelUnavailable)
    }
}
