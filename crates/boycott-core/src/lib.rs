//! Core types and the counter-update algorithm for boycott cause/company
//! stats.
//!
//! This crate is free of HTTP and database dependencies. Storage backends
//! implement [`store::StatsStore`]; the HTTP layer drives
//! [`updater::StatsCounterUpdater`].

pub mod error;
pub mod stats;
pub mod store;
pub mod updater;

pub use error::{Error, Result, ValidationError};
pub use updater::StatsCounterUpdater;
