use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::health;
use super::info;
use super::middleware::{logging_middleware, metrics_middleware};
use super::predict;
use super::state::AppState;
use super::types::ApiError;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(info::root_info))
        .route("/docs", get(info::docs))
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .route("/model", get(info::model_info))
        // Prediction endpoints
        .route("/predict", post(predict::predict))
        .route("/predict/batch", post(predict::predict_batch))
        .route_layer(middleware::from_fn(metrics_middleware))
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::MockChurnClassifier;
    use crate::infrastructure::model::{LoadedModel, ModelKind, ModelMetadata, ModelSlot};
    use crate::infrastructure::services::PredictionService;

    /// Low churn for high credit scores, high churn otherwise
    fn credit_score_model() -> LoadedModel {
        let mut mock = MockChurnClassifier::new();
        mock.expect_predict_proba()
            .returning(|features| Ok(if features.credit_score() > 750.0 { 0.2 } else { 0.7 }));

        LoadedModel::new(
            Box::new(mock),
            ModelMetadata::new("mock-churn", ModelKind::LogisticRegression, "memory"),
        )
    }

    fn state_with(slot: ModelSlot) -> AppState {
        AppState::new(Arc::new(slot), Arc::new(PredictionService::default()))
    }

    fn app_with_model() -> Router {
        create_router(state_with(ModelSlot::with_model(credit_score_model())))
    }

    fn app_without_model() -> Router {
        create_router(state_with(ModelSlot::empty()))
    }

    fn customer(credit_score: Value) -> Value {
        json!({
            "CreditScore": credit_score,
            "Age": 35,
            "Tenure": 5,
            "Balance": 50000,
            "NumOfProducts": 2,
            "HasCrCard": 1,
            "IsActiveMember": 1,
            "EstimatedSalary": 70000,
            "Geography_Germany": 0,
            "Geography_Spain": 1
        })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(app, request).await
    }

    async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(app, request).await
    }

    #[tokio::test]
    async fn test_root_endpoint() {
        let (status, body) = get_json(app_without_model(), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Bank Churn Prediction API");
        assert_eq!(body["version"], "1.0.0");
        assert_eq!(body["status"], "running");
        assert!(body.get("docs").is_some());
    }

    #[tokio::test]
    async fn test_docs_endpoint() {
        let (status, body) = get_json(app_without_model(), "/docs").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["endpoints"].as_array().unwrap().len() >= 4);
    }

    #[tokio::test]
    async fn test_health_with_model() {
        let (status, body) = get_json(app_with_model(), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "healthy", "model_loaded": true}));
    }

    #[tokio::test]
    async fn test_health_without_model() {
        let (status, body) = get_json(app_without_model(), "/health").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["detail"].as_str().unwrap().contains("not loaded"));
    }

    #[tokio::test]
    async fn test_live_without_model() {
        let (status, _) = get_json(app_without_model(), "/live").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_model_info() {
        let (status, body) = get_json(app_with_model(), "/model").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "mock-churn");
        assert_eq!(body["kind"], "logistic_regression");
        assert_eq!(body["feature_names"][0], "CreditScore");
        assert!(body.get("loaded_at").is_some());

        let (status, _) = get_json(app_without_model(), "/model").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_predict_high_credit_score() {
        let (status, body) =
            post_json(app_with_model(), "/predict", &customer(json!(800))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["churn_probability"], 0.2);
        assert_eq!(body["prediction"], 0);
        assert_eq!(body["risk_level"], "Low");
    }

    #[tokio::test]
    async fn test_predict_low_credit_score() {
        let mut record = customer(json!(600));
        record["Geography_Germany"] = json!(1);
        record["Geography_Spain"] = json!(0);

        let (status, body) = post_json(app_with_model(), "/predict", &record).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["churn_probability"], 0.7);
        assert_eq!(body["prediction"], 1);
        assert_eq!(body["risk_level"], "High");
    }

    #[tokio::test]
    async fn test_predict_is_idempotent() {
        let app = app_with_model();
        let record = customer(json!(700));

        let (_, first) = post_json(app.clone(), "/predict", &record).await;
        let (_, second) = post_json(app, "/predict", &record).await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_predict_without_model() {
        let (status, body) =
            post_json(app_without_model(), "/predict", &customer(json!(700))).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["detail"].as_str().unwrap().contains("not available"));
    }

    #[tokio::test]
    async fn test_predict_after_slot_cleared() {
        let slot = Arc::new(ModelSlot::with_model(credit_score_model()));
        let app = create_router(AppState::new(
            slot.clone(),
            Arc::new(PredictionService::default()),
        ));

        slot.clear();

        let (status, _) = post_json(app, "/predict", &customer(json!(700))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_predict_invalid_type() {
        let (status, body) =
            post_json(app_with_model(), "/predict", &customer(json!("invalid"))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["loc"], json!(["body", "CreditScore"]));
        assert_eq!(body["detail"][0]["type"], "int_type");
    }

    #[tokio::test]
    async fn test_predict_numeric_strings() {
        let mut record = customer(json!("800"));
        record["Balance"] = json!("50000");

        let (status, body) = post_json(app_with_model(), "/predict", &record).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["churn_probability"], 0.2);
        assert_eq!(body["risk_level"], "Low");
    }

    #[tokio::test]
    async fn test_predict_missing_fields() {
        let (status, body) = post_json(
            app_with_model(),
            "/predict",
            &json!({"CreditScore": 700, "Age": 35}),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_predict_geography_exclusion() {
        let mut record = customer(json!(700));
        record["Geography_Germany"] = json!(1);

        let (status, body) = post_json(app_with_model(), "/predict", &record).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["loc"], json!(["body", "Geography_Spain"]));
        assert_eq!(body["detail"][0]["type"], "value_error");
    }

    #[tokio::test]
    async fn test_out_of_range_fields_rejected() {
        let cases = [
            ("CreditScore", json!(299)),
            ("Age", json!(101)),
            ("Tenure", json!(-1)),
            ("Balance", json!(-0.01)),
            ("NumOfProducts", json!(5)),
            ("HasCrCard", json!(2)),
            ("IsActiveMember", json!(3)),
            ("EstimatedSalary", json!(-1)),
            ("Geography_Germany", json!(-1)),
            ("Geography_Spain", json!(2)),
        ];

        for (field, value) in cases {
            let mut record = customer(json!(700));
            record[field] = value;

            let (status, body) = post_json(app_with_model(), "/predict", &record).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "field {}", field);
            assert_eq!(body["detail"][0]["loc"][1], field);
        }
    }

    #[tokio::test]
    async fn test_validation_precedes_model_check() {
        let (status, _) =
            post_json(app_without_model(), "/predict", &customer(json!(10))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_predict_malformed_json() {
        let request = Request::builder()
            .method("POST")
            .uri("/predict")
            .header("content-type", "application/json")
            .body(Body::from("{\"CreditScore\": "))
            .unwrap();

        let (status, body) = send(app_with_model(), request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["type"], "json_invalid");
    }

    #[tokio::test]
    async fn test_predict_batch() {
        let batch = json!([customer(json!(750)), customer(json!(500))]);
        let (status, body) = post_json(app_with_model(), "/predict/batch", &batch).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);

        let predictions = body["predictions"].as_array().unwrap();
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0]["churn_probability"], 0.7);
        assert_eq!(predictions[1]["churn_probability"], 0.7);
        for prediction in predictions {
            assert!(prediction.get("churn_probability").is_some());
            assert!(prediction.get("prediction").is_some());
        }
    }

    #[tokio::test]
    async fn test_predict_batch_preserves_order() {
        let scores = [800, 500, 760, 751, 750, 300];
        let batch = Value::Array(scores.iter().map(|s| customer(json!(s))).collect());

        let (status, body) = post_json(app_with_model(), "/predict/batch", &batch).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], scores.len());

        let probabilities: Vec<f64> = body["predictions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["churn_probability"].as_f64().unwrap())
            .collect();
        assert_eq!(probabilities, vec![0.2, 0.7, 0.2, 0.2, 0.7, 0.7]);
    }

    #[tokio::test]
    async fn test_predict_batch_rejects_whole_batch() {
        let mut bad = customer(json!(700));
        bad["Age"] = json!(12);
        let batch = json!([customer(json!(700)), bad]);

        let (status, body) = post_json(app_with_model(), "/predict/batch", &batch).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["loc"], json!(["body", 1, "Age"]));
    }

    #[tokio::test]
    async fn test_predict_batch_requires_list() {
        let (status, body) =
            post_json(app_with_model(), "/predict/batch", &customer(json!(700))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["type"], "list_type");
    }

    #[tokio::test]
    async fn test_predict_batch_empty() {
        let (status, body) = post_json(app_with_model(), "/predict/batch", &json!([])).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"predictions": [], "count": 0}));
    }

    #[tokio::test]
    async fn test_predict_batch_without_model() {
        let batch = json!([customer(json!(700))]);
        let (status, _) = post_json(app_without_model(), "/predict/batch", &batch).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = get_json(app_without_model(), "/nope").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"detail": "Not Found"}));
    }

    #[tokio::test]
    async fn test_request_id_echoed() {
        let request = Request::builder()
            .uri("/")
            .header("x-request-id", "req-42")
            .body(Body::empty())
            .unwrap();

        let response = app_without_model().oneshot(request).await.unwrap();
        assert_eq!(response.headers()["x-request-id"], "req-42");

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app_without_model().oneshot(request).await.unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }
}
