//! Raw-SQL query modules, one per entity.
//!
//! Timestamps are stored as fixed-width RFC 3339 text (microsecond precision,
//! `Z` suffix) so lexical order equals chronological order.

pub mod agent_ops;
pub mod answer_ops;
pub mod audit_ops;
pub mod question_ops;
pub mod verification_ops;

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};

use errorcache_core::errors::ErrorCacheResult;

use crate::to_storage_err;

pub(crate) fn fmt_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_ts(s: &str) -> ErrorCacheResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("parse datetime '{s}': {e}")))
}

/// Parse a stored enum label.
pub(crate) fn parse_label<T>(column: &str, s: &str) -> ErrorCacheResult<T>
where
    T: FromStr<Err = String>,
{
    s.parse()
        .map_err(|e| to_storage_err(format!("parse {column} '{s}': {e}")))
}
