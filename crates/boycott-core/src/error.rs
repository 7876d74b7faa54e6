//! Error types for `boycott-core`.

use thiserror::Error;

/// A request was rejected before any write was attempted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
  /// An increment arrived without one or both display fields. The payload
  /// names the missing field(s).
  #[error("{0} required when incrementing")]
  MissingDisplayFields(&'static str),
}

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
