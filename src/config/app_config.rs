use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::prediction::{
    DEFAULT_DECISION_THRESHOLD, DEFAULT_HIGH_RISK_THRESHOLD, DEFAULT_MEDIUM_RISK_THRESHOLD,
};
use crate::domain::{DomainError, PredictionPolicy};

/// Legacy single setting naming the model artifact
pub const MODEL_PATH_ENV: &str = "MODEL_PATH";

/// Directory holding `default.*` and `local.*`, relative to the working directory
pub const CONFIG_DIR: &str = "config";

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub prediction: PredictionConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Path to the serialized classifier
    #[serde(default = "default_model_path")]
    pub path: PathBuf,
}

/// Probability cut points applied to every prediction
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionConfig {
    #[serde(default = "default_decision_threshold")]
    pub decision_threshold: f64,
    #[serde(default = "default_medium_risk_threshold")]
    pub medium_risk_threshold: f64,
    #[serde(default = "default_high_risk_threshold")]
    pub high_risk_threshold: f64,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ObservabilityConfig {
    #[serde(default)]
    pub tracing: TracingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// OTLP span export; local logging is unaffected
#[derive(Debug, Clone, Deserialize)]
pub struct TracingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_otlp_endpoint")]
    pub otlp_endpoint: String,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Fraction of traces kept, in [0, 1]
    #[serde(default = "default_sampling_ratio")]
    pub sampling_ratio: f64,
}

/// Prometheus exposition, served next to the prediction routes
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_model_path() -> PathBuf {
    PathBuf::from("model/churn_model.json")
}

fn default_decision_threshold() -> f64 {
    DEFAULT_DECISION_THRESHOLD
}

fn default_medium_risk_threshold() -> f64 {
    DEFAULT_MEDIUM_RISK_THRESHOLD
}

fn default_high_risk_threshold() -> f64 {
    DEFAULT_HIGH_RISK_THRESHOLD
}

fn default_otlp_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_service_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_sampling_ratio() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
        }
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            decision_threshold: DEFAULT_DECISION_THRESHOLD,
            medium_risk_threshold: DEFAULT_MEDIUM_RISK_THRESHOLD,
            high_risk_threshold: DEFAULT_HIGH_RISK_THRESHOLD,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            otlp_endpoint: default_otlp_endpoint(),
            service_name: default_service_name(),
            sampling_ratio: default_sampling_ratio(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_metrics_path(),
        }
    }
}

impl PredictionConfig {
    pub fn policy(&self) -> Result<PredictionPolicy, DomainError> {
        PredictionPolicy::new(
            self.decision_threshold,
            self.medium_risk_threshold,
            self.high_risk_threshold,
        )
    }
}

impl TracingConfig {
    fn validate(&self) -> Result<(), DomainError> {
        if !(0.0..=1.0).contains(&self.sampling_ratio) {
            return Err(DomainError::configuration(format!(
                "observability.tracing.sampling_ratio must be within [0, 1], got {}",
                self.sampling_ratio
            )));
        }

        if self.enabled && self.otlp_endpoint.trim().is_empty() {
            return Err(DomainError::configuration(
                "observability.tracing.otlp_endpoint is required when tracing is enabled",
            ));
        }

        Ok(())
    }
}

impl MetricsConfig {
    fn validate(&self) -> Result<(), DomainError> {
        if self.enabled && (!self.path.starts_with('/') || self.path.len() < 2) {
            return Err(DomainError::configuration(format!(
                "observability.metrics.path must be an absolute route like /metrics, got {:?}",
                self.path
            )));
        }

        Ok(())
    }
}

impl AppConfig {
    /// Load from `config/`, the process environment and `MODEL_PATH`
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new(CONFIG_DIR), std::env::vars().collect())
    }

    /// Load with an explicit config directory and environment.
    ///
    /// Later sources win: `default.*`, `local.*`, `APP__*` variables, then
    /// `MODEL_PATH` for the model artifact.
    pub fn load_from(
        config_dir: &Path,
        env: config::Map<String, String>,
    ) -> Result<Self, config::ConfigError> {
        let model_path = env.get(MODEL_PATH_ENV).cloned();

        let config = config::Config::builder()
            .add_source(config::File::from(config_dir.join("default")).required(false))
            .add_source(config::File::from(config_dir.join("local")).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(env)),
            )
            .set_override_option("model.path", model_path)?
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config
            .validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;

        Ok(app_config)
    }

    /// Cross-field checks that serde defaults cannot express
    pub fn validate(&self) -> Result<(), DomainError> {
        self.prediction.policy()?;
        self.observability.tracing.validate()?;
        self.observability.metrics.validate()?;

        if self.model.path.as_os_str().is_empty() {
            return Err(DomainError::configuration("model.path must not be empty"));
        }

        Ok(())
    }
}
