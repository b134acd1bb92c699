//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error returned by an API handler.
///
/// Store failures are reported to the client without detail; the cause is
/// logged server-side.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The body is not JSON or lacks the `customer` object.
  #[error("malformed request body")]
  Malformed(#[from] JsonRejection),

  #[error("survey is incomplete, missing: {}", .0.join(", "))]
  Incomplete(Vec<&'static str>),

  #[error("failed to save survey")]
  Save(#[source] BoxError),

  #[error("failed to load statistics")]
  Stats(#[source] BoxError),
}

impl ApiError {
  pub fn save(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Save(Box::new(e))
  }

  pub fn stats(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Stats(Box::new(e))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match &self {
      ApiError::Malformed(rejection) => (
        rejection.status(),
        Json(json!({ "error": rejection.body_text() })),
      )
        .into_response(),
      ApiError::Incomplete(missing) => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": self.to_string(), "missing": missing })),
      )
        .into_response(),
      ApiError::Save(e) | ApiError::Stats(e) => {
        tracing::error!(error = %e, "{self}");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "error": self.to_string() })),
        )
          .into_response()
      }
    }
  }
}
