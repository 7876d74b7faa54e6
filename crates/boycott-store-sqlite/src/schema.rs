//! SQL schema for the stats SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Table holding one row per (cause, company) pair.
pub const TABLE_NAME: &str = "cause_company_stats";

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS cause_company_stats (
    cause_id      TEXT    NOT NULL,
    company_id    TEXT    NOT NULL,
    boycott_count INTEGER NOT NULL DEFAULT 0
                  CHECK (typeof(boycott_count) = 'integer'),
    company_name  TEXT,             -- written once, never overwritten
    cause_desc    TEXT,             -- written once, never overwritten
    PRIMARY KEY (cause_id, company_id)
);

PRAGMA user_version = 1;
";

/// The atomic upsert.
///
/// `?3` is the delta. `?4`/`?5` are the display defaults, bound as NULL on
/// the decrement path so neither the insert nor the conflict branch writes
/// them.
///
/// SQLite promotes an overflowing integer sum to REAL. The CASE turns that
/// into NULL so the NOT NULL constraint fails the whole statement; at the
/// negative edge the REAL would otherwise be coerced back to `i64::MIN`.
pub const UPSERT: &str = "
INSERT INTO cause_company_stats
    (cause_id, company_id, boycott_count, company_name, cause_desc)
VALUES (?1, ?2, 0 + ?3, ?4, ?5)
ON CONFLICT (cause_id, company_id) DO UPDATE SET
    boycott_count = CASE
        WHEN typeof(COALESCE(boycott_count, 0) + ?3) = 'integer'
        THEN COALESCE(boycott_count, 0) + ?3
    END,
    company_name  = COALESCE(company_name, excluded.company_name),
    cause_desc    = COALESCE(cause_desc, excluded.cause_desc)
";
