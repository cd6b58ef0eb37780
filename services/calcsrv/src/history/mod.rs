//! Calculation history
//!
//! Persists one record per successful calculation and serves filtered/sorted
//! reads of the most recent records. The store sits behind a trait and is
//! injected into the API state, so tests substitute the in-memory
//! implementation for the SQLite one.

pub mod memory_store;
pub mod sqlite_store;

pub use memory_store::MemoryHistoryStore;
pub use sqlite_store::SqliteHistoryStore;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::calculator::Operation;
use crate::error::Result;

/// Maximum number of records a history query returns
pub const HISTORY_LIMIT: usize = 10;

/// One persisted calculation.
///
/// `a` and `b` are always the first two operands of the originating request,
/// regardless of how many operands participated; records are immutable once
/// stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRecord {
    pub operation: Operation,
    pub a: f64,
    pub b: f64,
    pub result: f64,
    #[serde(serialize_with = "serialize_iso8601")]
    pub date: DateTime<Utc>,
}

fn serialize_iso8601<S>(
    date: &DateTime<Utc>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_iso8601(date))
}

/// RFC 3339 UTC with microsecond precision and a numeric offset; fixed-width,
/// so lexicographic order equals chronological order.
pub(crate) fn format_iso8601(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Sort field for history queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    #[default]
    Date,
    Result,
}

impl OrderBy {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "date" => Some(OrderBy::Date),
            "result" => Some(OrderBy::Result),
            _ => None,
        }
    }
}

/// Sort direction for history queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// History read request. Defaults: no filter, newest first.
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    pub operation: Option<Operation>,
    pub order_by: OrderBy,
    pub sort_order: SortOrder,
}

/// Storage interface for calculation records
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Insert one record tagged with the current UTC timestamp.
    ///
    /// `operation` is `None` on the legacy sum path, which writes no
    /// operation tag (matching the records that endpoint has always
    /// produced).
    async fn append(
        &self,
        operation: Option<Operation>,
        a: f64,
        b: f64,
        result: f64,
    ) -> Result<()>;

    /// Return at most [`HISTORY_LIMIT`] records under the requested filter
    /// and sort. Untagged records surface as `sum` on read but never match
    /// an operation filter.
    async fn query(&self, query: &HistoryQuery) -> Result<Vec<HistoryRecord>>;
}
