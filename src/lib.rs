//! Bank Churn Prediction API
//!
//! Scores bank customers for churn risk over HTTP:
//! - Strict validation of customer records
//! - A single process-wide model slot filled from a JSON artifact at startup
//! - Probability, binary label and risk bucket per customer

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::model::load_at_startup;
use infrastructure::services::PredictionService;

/// Build application state from configuration.
///
/// Invalid thresholds are fatal. A missing or unreadable model artifact is
/// not: the slot stays empty and prediction endpoints answer 503.
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let policy = config.prediction.policy()?;
    let models = load_at_startup(&config.model.path);

    Ok(AppState::new(
        Arc::new(models),
        Arc::new(PredictionService::new(policy)),
    ))
}
