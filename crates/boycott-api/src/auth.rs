//! Caller subject resolution and the [`Subject`] extractor.
//!
//! Token signatures are verified by the gateway in front of this service;
//! here we only read the `sub` claim out of the bearer token.

use std::fmt;

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64URL;
use boycott_core::store::StatsStore;
use serde::Deserialize;

use crate::{AppState, error::ApiError};

/// Resolves the caller's subject identifier from request headers.
pub trait SubjectResolver: Send + Sync {
  /// Return `None` when the request carries no usable subject.
  fn resolve(&self, headers: &HeaderMap) -> Option<String>;
}

/// Reads the `sub` claim from an `Authorization: Bearer <jwt>` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct BearerSubjectResolver;

impl SubjectResolver for BearerSubjectResolver {
  fn resolve(&self, headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
      return None;
    }
    subject_from_jwt(token.trim())
  }
}

#[derive(Deserialize)]
struct Claims {
  sub: Option<String>,
}

/// Extract a non-empty `sub` claim from the payload of a compact JWT.
pub fn subject_from_jwt(token: &str) -> Option<String> {
  let mut segments = token.split('.');
  let (_header, payload, _signature) =
    (segments.next()?, segments.next()?, segments.next()?);
  if segments.next().is_some() {
    return None;
  }

  let decoded = B64URL.decode(payload.trim_end_matches('=')).ok()?;
  let claims: Claims = serde_json::from_slice(&decoded).ok()?;
  claims.sub.filter(|s| !s.trim().is_empty())
}

/// The authenticated caller. Present in a handler means a subject resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject(pub String);

impl fmt::Display for Subject {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl<S> FromRequestParts<AppState<S>> for Subject
where
  S: StatsStore + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    match state.subjects.resolve(&parts.headers) {
      Some(sub) => Ok(Subject(sub)),
      None => {
        tracing::warn!(uri = %parts.uri, "user is unauthorized");
        Err(ApiError::Unauthorized)
      }
    }
  }
}
