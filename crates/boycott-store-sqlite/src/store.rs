//! [`SqliteStore`] — the SQLite implementation of [`StatsStore`].

use std::path::Path;

use boycott_core::{
  stats::{StatsKey, StatsRecord, StatsUpdate},
  store::StatsStore,
};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  schema::{SCHEMA, TABLE_NAME, UPSERT},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A stats store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!(table = TABLE_NAME, "schema ready");
    Ok(())
  }

  /// Fetch the record stored under `key`, if any.
  ///
  /// Not part of [`StatsStore`]; the service never reads before writing.
  /// Used for inspection and tests.
  pub async fn record(&self, key: &StatsKey) -> Result<Option<StatsRecord>> {
    let cause_id   = key.cause_id.clone();
    let company_id = key.company_id.clone();

    let record = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT cause_id, company_id, boycott_count, company_name, cause_desc
             FROM cause_company_stats
             WHERE cause_id = ?1 AND company_id = ?2",
            rusqlite::params![cause_id, company_id],
            |row| {
              Ok(StatsRecord {
                cause_id:      row.get(0)?,
                company_id:    row.get(1)?,
                boycott_count: row.get(2)?,
                company_name:  row.get(3)?,
                cause_desc:    row.get(4)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    Ok(record)
  }
}

// ─── StatsStore impl ─────────────────────────────────────────────────────────

impl StatsStore for SqliteStore {
  type Error = Error;

  async fn apply_update(&self, update: StatsUpdate) -> Result<()> {
    let StatsUpdate { key, delta, defaults } = update;
    let (company_name, cause_desc) = match defaults {
      Some(d) => (Some(d.company_name), Some(d.cause_desc)),
      None    => (None, None),
    };

    // A single statement, so SQLite applies it atomically.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          UPSERT,
          rusqlite::params![
            key.cause_id,
            key.company_id,
            delta,
            company_name,
            cause_desc,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(())
  }
}
