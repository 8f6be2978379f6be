//! Check-model command - loads an artifact offline and scores sample records

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use serde_json::Value;

use crate::api::types::{BatchPredictionResponse, PredictionResponse};
use crate::config::AppConfig;
use crate::domain::{validate_batch, validate_record};
use crate::infrastructure::model::{load_model, LoadedModel, ModelMetadata};
use crate::infrastructure::services::PredictionService;

/// Arguments for the check-model command
#[derive(Args, Clone, Debug)]
pub struct CheckModelArgs {
    /// Model artifact to check (defaults to the configured model path)
    pub path: Option<PathBuf>,

    /// JSON file holding one customer record or a list of records to score
    #[arg(long)]
    pub records: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    model: &'a ModelMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    scored: Option<Scored>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Scored {
    Single(PredictionResponse),
    Batch(BatchPredictionResponse),
}

/// Run the check and print a JSON report to stdout
pub async fn run(args: CheckModelArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let path = args.path.clone().unwrap_or_else(|| config.model.path.clone());
    let service = PredictionService::new(config.prediction.policy()?);

    let model = load_model(&path)?;
    let scored = match &args.records {
        Some(records) => Some(score_file(&model, &service, records)?),
        None => None,
    };

    let report = CheckReport {
        model: model.metadata(),
        scored,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn score_file(
    model: &LoadedModel,
    service: &PredictionService,
    records: &Path,
) -> anyhow::Result<Scored> {
    let contents = fs::read_to_string(records)
        .with_context(|| format!("Failed to read records {}", records.display()))?;
    let body: Value = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse records {}", records.display()))?;

    score_value(model, service, &body)
}

fn score_value(
    model: &LoadedModel,
    service: &PredictionService,
    body: &Value,
) -> anyhow::Result<Scored> {
    if body.is_array() {
        let customers = validate_batch(body)?;
        let predictions = service.predict_batch(model.classifier(), &customers)?;

        Ok(Scored::Batch(BatchPredictionResponse::from_domain(&predictions)))
    } else {
        let customer = validate_record(body)?;
        let prediction = service.predict(model.classifier(), &customer)?;

        Ok(Scored::Single(PredictionResponse::from_domain(&prediction)))
    }
}
