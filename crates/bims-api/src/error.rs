//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use bims_core::Error as CoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Core(#[from] CoreError),
}

impl ApiError {
  pub fn unauthorized(message: &str) -> Self { Self::Core(CoreError::Unauthorized(message.into())) }

  pub fn forbidden(message: &str) -> Self { Self::Core(CoreError::Forbidden(message.into())) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let ApiError::Core(core) = self;

    match core {
      CoreError::Validation(fields) => (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": "Validation failed", "fields": fields })),
      )
        .into_response(),
      CoreError::Unauthorized(m) => {
        let mut res = (StatusCode::UNAUTHORIZED, Json(json!({ "error": m }))).into_response();
        res
          .headers_mut()
          .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        res
      }
      CoreError::NotFound(m) => (StatusCode::NOT_FOUND, Json(json!({ "error": m }))).into_response(),
      CoreError::Conflict(m) => (StatusCode::CONFLICT, Json(json!({ "error": m }))).into_response(),
      CoreError::InvalidReference(m) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": m }))).into_response()
      }
      CoreError::Forbidden(m) => (StatusCode::FORBIDDEN, Json(json!({ "error": m }))).into_response(),
      e @ CoreError::Storage(_) => {
        tracing::error!(error = %e, "request failed");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "error": "Internal server error" })),
        )
          .into_response()
      }
    }
  }
}
