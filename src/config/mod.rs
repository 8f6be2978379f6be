//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, LogFormat, LoggingConfig, MetricsConfig, ModelConfig, ObservabilityConfig,
    PredictionConfig, ServerConfig, TracingConfig, CONFIG_DIR, MODEL_PATH_ENV,
};
