//! Service metadata endpoints

use axum::extract::State;
use serde::Serialize;

use super::state::AppState;
use super::types::{ApiError, Json, MODEL_NOT_LOADED};
use crate::domain::feature_names;
use crate::infrastructure::model::ModelMetadata;

pub const SERVICE_NAME: &str = "Bank Churn Prediction API";
pub const DOCS_PATH: &str = "/docs";

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub docs: &'static str,
}

#[derive(Debug, Serialize)]
pub struct EndpointDoc {
    pub method: &'static str,
    pub path: &'static str,
    pub summary: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DocsResponse {
    pub title: &'static str,
    pub version: &'static str,
    pub endpoints: &'static [EndpointDoc],
}

pub const ENDPOINTS: &[EndpointDoc] = &[
    EndpointDoc {
        method: "GET",
        path: "/",
        summary: "Service metadata",
    },
    EndpointDoc {
        method: "GET",
        path: DOCS_PATH,
        summary: "This endpoint catalogue",
    },
    EndpointDoc {
        method: "GET",
        path: "/health",
        summary: "Readiness: 200 when a model is loaded, 503 otherwise",
    },
    EndpointDoc {
        method: "GET",
        path: "/live",
        summary: "Liveness probe",
    },
    EndpointDoc {
        method: "GET",
        path: "/model",
        summary: "Metadata of the loaded model",
    },
    EndpointDoc {
        method: "POST",
        path: "/predict",
        summary: "Score one customer record",
    },
    EndpointDoc {
        method: "POST",
        path: "/predict/batch",
        summary: "Score an ordered list of customer records",
    },
];

/// GET /
pub async fn root_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
        docs: DOCS_PATH,
    })
}

/// GET /docs
pub async fn docs() -> Json<DocsResponse> {
    Json(DocsResponse {
        title: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS,
    })
}

#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    #[serde(flatten)]
    pub metadata: ModelMetadata,
    pub feature_names: Vec<&'static str>,
}

/// GET /model
pub async fn model_info(
    State(state): State<AppState>,
) -> Result<Json<ModelInfoResponse>, ApiError> {
    let model = state
        .models
        .current()
        .ok_or_else(|| ApiError::unavailable(MODEL_NOT_LOADED))?;

    Ok(Json(ModelInfoResponse {
        metadata: model.metadata().clone(),
        feature_names: feature_names().to_vec(),
    }))
}
