//! SQLite-backed history store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::sqlite::SqliteClient;
use sqlx::{sqlite::SqliteRow, Row};
use tracing::debug;

use super::{
    format_iso8601, HistoryQuery, HistoryRecord, HistoryStore, OrderBy, SortOrder, HISTORY_LIMIT,
};
use crate::calculator::Operation;
use crate::error::{CalcSrvError, Result};

/// History table DDL. `operation` is nullable because early records were
/// written without a tag; `date` holds an RFC 3339 UTC string.
const HISTORY_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS history (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        operation TEXT,
        a REAL NOT NULL,
        b REAL NOT NULL,
        result REAL NOT NULL,
        date TEXT NOT NULL
    )
"#;

/// History store persisting records through the shared SQLite client
pub struct SqliteHistoryStore {
    client: SqliteClient,
}

impl SqliteHistoryStore {
    /// Open (creating if necessary) the database at `path` and make sure the
    /// history table exists.
    pub async fn connect(path: &str) -> Result<Self> {
        let client = SqliteClient::new(path)
            .await
            .map_err(|e| CalcSrvError::Database(e.to_string()))?;
        Self::with_client(client).await
    }

    /// Wrap an already-open client.
    pub async fn with_client(client: SqliteClient) -> Result<Self> {
        sqlx::query(HISTORY_TABLE).execute(client.pool()).await?;
        Ok(Self { client })
    }

    /// Access the underlying client (connectivity checks)
    pub fn client(&self) -> &SqliteClient {
        &self.client
    }
}

#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    async fn append(
        &self,
        operation: Option<Operation>,
        a: f64,
        b: f64,
        result: f64,
    ) -> Result<()> {
        let date = format_iso8601(&Utc::now());

        sqlx::query("INSERT INTO history (operation, a, b, result, date) VALUES (?, ?, ?, ?, ?)")
            .bind(operation.map(|op| op.as_str()))
            .bind(a)
            .bind(b)
            .bind(result)
            .bind(&date)
            .execute(self.client.pool())
            .await?;

        debug!("appended history record: operation={:?} result={}", operation, result);
        Ok(())
    }

    async fn query(&self, query: &HistoryQuery) -> Result<Vec<HistoryRecord>> {
        let mut sql = String::from(
            "SELECT COALESCE(operation, 'sum') AS operation, a, b, result, date FROM history",
        );
        if query.operation.is_some() {
            sql.push_str(" WHERE operation = ?");
        }

        let field = match query.order_by {
            OrderBy::Date => "date",
            OrderBy::Result => "result",
        };
        let direction = match query.sort_order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        // Ties resolve by insertion order, following the sort direction
        sql.push_str(&format!(
            " ORDER BY {field} {direction}, id {direction} LIMIT {HISTORY_LIMIT}"
        ));

        let mut stmt = sqlx::query(&sql);
        if let Some(operation) = query.operation {
            stmt = stmt.bind(operation.as_str());
        }

        let rows = stmt.fetch_all(self.client.pool()).await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(hydrate_record(&row)?);
        }
        Ok(records)
    }
}

fn hydrate_record(row: &SqliteRow) -> Result<HistoryRecord> {
    let operation: String = row.try_get("operation")?;
    let date: String = row.try_get("date")?;
    let date = DateTime::parse_from_rfc3339(&date)
        .map_err(|e| CalcSrvError::Database(format!("invalid date in history record: {}", e)))?
        .with_timezone(&Utc);

    Ok(HistoryRecord {
        // Read defensively: unexpected tags fall back to sum
        operation: Operation::parse(&operation).unwrap_or(Operation::Sum),
        a: row.try_get("a")?,
        b: row.try_get("b")?,
        result: row.try_get("result")?,
        date,
    })
}
