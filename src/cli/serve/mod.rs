//! Serve command - runs the HTTP API

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use axum::Router;
use clap::Args;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::api::info::ENDPOINTS;
use crate::api::{create_router, AppState};
use crate::config::AppConfig;
use crate::infrastructure::observability::{
    create_metrics_router, init_metrics, init_tracing, shutdown_tracing, PrometheusMetrics,
};

/// Arguments for the serve command
#[derive(Args, Clone, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Model artifact to load at startup (overrides config and MODEL_PATH)
    #[arg(long)]
    pub model_path: Option<PathBuf>,
}

impl ServeArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(path) = &self.model_path {
            config.model.path = path.clone();
        }
    }
}

/// Run the API server
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    args.apply(&mut config);
    init_tracing(&config.logging, &config.observability.tracing);

    let metrics = init_metrics(&config.observability.metrics);
    let state = crate::create_app_state(&config)?;
    let app = create_app(state, metrics, &config)?;

    let addr = build_socket_addr(&config)?;
    info!("Starting churn prediction API on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tracing();
    info!("API server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}

/// API router plus the metrics endpoint when enabled
fn create_app(
    state: AppState,
    metrics: Option<PrometheusMetrics>,
    config: &AppConfig,
) -> anyhow::Result<Router> {
    let router = create_router(state);

    let Some(metrics) = metrics else {
        return Ok(router);
    };

    let path = &config.observability.metrics.path;
    if is_api_route(path) {
        anyhow::bail!("Metrics path {} collides with an API route", path);
    }

    Ok(router.merge(create_metrics_router(metrics, path)))
}

fn is_api_route(path: &str) -> bool {
    ENDPOINTS.iter().any(|endpoint| endpoint.path == path)
}
