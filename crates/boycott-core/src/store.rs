//! The `StatsStore` trait.
//!
//! Implemented by storage backends (e.g. `boycott-store-sqlite`). The HTTP
//! layer and the updater depend on this abstraction, not on a concrete
//! backend.

use std::future::Future;

use crate::stats::StatsUpdate;

/// Abstraction over a key-value store holding stats records.
///
/// The store owns atomicity: concurrent updates against the same key must
/// never lose a delta, and display defaults must never overwrite an existing
/// value. Callers never read before writing.
pub trait StatsStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Apply `update` as one atomic upsert, creating the record if absent.
  fn apply_update(
    &self,
    update: StatsUpdate,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
