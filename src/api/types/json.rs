//! Custom JSON extractor that returns errors in the API error format

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;

use super::error::{ApiError, FieldErrorDetail};

/// Wrapper around `axum::Json` whose rejections use the `{"detail": ...}`
/// body. Malformed JSON is reported as 422, like any other body error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Json(value)),
            Err(rejection) => Err(rejection_to_error(&rejection)),
        }
    }
}

fn rejection_to_error(rejection: &JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonSyntaxError(err) => ApiError::unprocessable(vec![FieldErrorDetail::body(
            format!("Invalid JSON: {}", err.body_text()),
            "json_invalid",
        )]),
        JsonRejection::JsonDataError(err) => ApiError::unprocessable(vec![FieldErrorDetail::body(
            err.body_text(),
            "value_error",
        )]),
        JsonRejection::MissingJsonContentType(_) => ApiError::message(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Missing Content-Type header. Expected 'application/json'.",
        ),
        JsonRejection::BytesRejection(err) => ApiError::message(
            rejection.status(),
            format!("Failed to read request body: {}", err.body_text()),
        ),
        _ => ApiError::message(rejection.status(), "Invalid JSON request"),
    }
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}
