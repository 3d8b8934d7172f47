//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! 4xx messages are user-facing. 5xx bodies are deliberately generic; the
//! underlying detail is logged server-side only, so store and forecast
//! internals never leak to callers.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("forecast error: {0}")]
  Forecast(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "store error".to_string())
      }
      ApiError::Forecast(e) => {
        // Execution and parse failures are distinguished here, in the log,
        // not in the response body.
        tracing::error!(error = %e, "forecast failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "forecast failed".to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
