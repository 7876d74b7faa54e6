//! Handler for `POST /cause-company-stats/{cause_id}/{company_id}`.
//!
//! Body: `{"company_name": "...", "cause_desc": "...", "increment": true}`.
//! The body is parsed by hand, and path and body extractor rejections are
//! taken as values, so every failure renders in the JSON error envelope.

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{BytesRejection, PathRejection},
  },
};
use boycott_core::{stats::StatsKey, store::StatsStore};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{AppState, auth::Subject, error::ApiError};

#[derive(Debug, Default, Deserialize)]
pub struct StatsPath {
  pub cause_id:   Option<String>,
  pub company_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IncrementBody {
  pub company_name: Option<String>,
  pub cause_desc:   Option<String>,
  #[serde(default)]
  pub increment:    bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
  pub record_updated: bool,
}

/// Build the key, treating absent and blank identifiers alike.
pub fn require_key(
  cause_id: Option<String>,
  company_id: Option<String>,
) -> Result<StatsKey, ApiError> {
  let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
  match (present(cause_id), present(company_id)) {
    (Some(cause_id), Some(company_id)) => Ok(StatsKey { cause_id, company_id }),
    (None, None) => Err(ApiError::MissingPath("cause_id and company_id not present")),
    (None, Some(_)) => Err(ApiError::MissingPath("cause_id not present")),
    (Some(_), None) => Err(ApiError::MissingPath("company_id not present")),
  }
}

/// `POST /cause-company-stats/{cause_id}/{company_id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  subject: Subject,
  path: Result<Path<StatsPath>, PathRejection>,
  body: Result<Bytes, BytesRejection>,
) -> Result<Json<UpdateResponse>, ApiError>
where
  S: StatsStore + 'static,
{
  let Path(path) = path
    .map_err(ApiError::from)
    .inspect_err(|e| tracing::warn!(%subject, "{e}"))?;

  let key = require_key(path.cause_id, path.company_id)
    .inspect_err(|e| tracing::warn!(%subject, "{e}"))?;

  let body = body
    .map_err(ApiError::from)
    .inspect_err(|e| tracing::warn!(%subject, "{e}"))?;

  let body: IncrementBody = serde_json::from_slice(&body)
    .map_err(ApiError::from)
    .inspect_err(|e| tracing::error!(%subject, "{e}"))?;

  // Store failures are already logged by the updater.
  let record_updated = state
    .updater
    .apply(key, body.company_name, body.cause_desc, body.increment)
    .await
    .inspect_err(|e| {
      if let boycott_core::Error::Validation(v) = e {
        tracing::warn!(%subject, "{v}");
      }
    })?;

  Ok(Json(UpdateResponse { record_updated }))
}
