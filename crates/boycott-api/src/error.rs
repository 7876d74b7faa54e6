//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{BytesRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// No caller subject could be resolved from the request credentials.
  #[error("Unauthorized")]
  Unauthorized,

  /// One or both path identifiers are absent or blank.
  #[error("{0}")]
  MissingPath(&'static str),

  /// The path parameters could not be decoded (e.g. invalid UTF-8).
  #[error("invalid path parameters: {}", .0.body_text())]
  Path(#[from] PathRejection),

  /// The request body could not be read (e.g. over the size limit).
  #[error("{}", .0.body_text())]
  Payload(#[from] BytesRejection),

  #[error("malformed request body: {0}")]
  Body(#[from] serde_json::Error),

  #[error(transparent)]
  Update(#[from] boycott_core::Error),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
      ApiError::MissingPath(_) => StatusCode::BAD_REQUEST,
      ApiError::Path(r) => r.status(),
      ApiError::Payload(r) => r.status(),
      ApiError::Update(boycott_core::Error::Validation(_)) => StatusCode::BAD_REQUEST,
      ApiError::Body(_) | ApiError::Update(boycott_core::Error::Store(_)) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = if status.is_server_error() {
      format!("Unexpected server error: {self}")
    } else {
      self.to_string()
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
