//! JSON REST API for boycott cause/company stats.
//!
//! Exposes an axum [`Router`] backed by any [`StatsStore`]. TLS and transport
//! concerns are the caller's responsibility.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/cause-company-stats/{cause_id}/{company_id}` | Body: [`stats::IncrementBody`]; returns `{"recordUpdated":true}` |

pub mod auth;
pub mod error;
pub mod stats;

use std::sync::Arc;

use axum::{Router, routing::post};
use boycott_core::{StatsCounterUpdater, store::StatsStore};

pub use error::ApiError;

use auth::SubjectResolver;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S> {
  pub updater:  StatsCounterUpdater<S>,
  pub subjects: Arc<dyn SubjectResolver>,
}

impl<S: StatsStore> AppState<S> {
  pub fn new(store: Arc<S>, subjects: Arc<dyn SubjectResolver>) -> Self {
    Self { updater: StatsCounterUpdater::new(store), subjects }
  }
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { updater: self.updater.clone(), subjects: Arc::clone(&self.subjects) }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The single-segment route exists so a request missing the company
/// identifier gets a 400 with a precise message rather than a 404.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: StatsStore + 'static,
{
  Router::new()
    .route("/cause-company-stats/{cause_id}/{company_id}", post(stats::update::<S>))
    .route("/cause-company-stats/{cause_id}", post(stats::update::<S>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
