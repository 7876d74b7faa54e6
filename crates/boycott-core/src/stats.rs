//! The stats record and the storage-level description of one update.
//!
//! A record is keyed by the (cause, company) pair. Its counter is the only
//! mutable field; the display fields are written at most once.

use serde::{Deserialize, Serialize};

/// Composite primary key of a stats record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatsKey {
  pub cause_id:   String,
  pub company_id: String,
}

impl StatsKey {
  pub fn new(cause_id: impl Into<String>, company_id: impl Into<String>) -> Self {
    Self { cause_id: cause_id.into(), company_id: company_id.into() }
  }
}

/// One row of `cause_company_stats`.
///
/// `company_name` and `cause_desc` are `None` when the record was created by
/// a decrement and no increment has supplied them since.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRecord {
  pub cause_id:      String,
  pub company_id:    String,
  pub boycott_count: i64,
  pub company_name:  Option<String>,
  pub cause_desc:    Option<String>,
}

/// Which way the counter moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  Increment,
  Decrement,
}

impl Direction {
  pub fn delta(self) -> i64 {
    match self {
      Direction::Increment => 1,
      Direction::Decrement => -1,
    }
  }

  pub fn is_increment(self) -> bool { matches!(self, Self::Increment) }
}

impl From<bool> for Direction {
  fn from(increment: bool) -> Self {
    if increment { Direction::Increment } else { Direction::Decrement }
  }
}

/// Denormalized display strings carried by an increment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFields {
  pub company_name: String,
  pub cause_desc:   String,
}

/// A single atomic update against one key.
///
/// The store must apply it as one indivisible operation:
///
/// - `boycott_count := coalesce(boycott_count, 0) + delta`
/// - if `defaults` is `Some`, each display field is set only when the record
///   does not already carry a value for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsUpdate {
  pub key:      StatsKey,
  pub delta:    i64,
  pub defaults: Option<DisplayFields>,
}
