//! In-memory history store
//!
//! Mirrors the SQLite store's filter/sort/limit semantics without I/O. Used
//! to substitute the real store in router tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;

use super::{HistoryQuery, HistoryRecord, HistoryStore, OrderBy, SortOrder, HISTORY_LIMIT};
use crate::calculator::Operation;
use crate::error::{CalcSrvError, Result};

struct StoredRecord {
    seq: usize,
    operation: Option<Operation>,
    a: f64,
    b: f64,
    result: f64,
    date: DateTime<Utc>,
}

/// Memory store implementation
#[derive(Default)]
pub struct MemoryHistoryStore {
    records: Mutex<Vec<StoredRecord>>,
}

impl MemoryHistoryStore {
    /// Create a new memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn count(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<StoredRecord>>> {
        self.records
            .lock()
            .map_err(|_| CalcSrvError::Database("history store lock poisoned".to_string()))
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn append(
        &self,
        operation: Option<Operation>,
        a: f64,
        b: f64,
        result: f64,
    ) -> Result<()> {
        let mut records = self.lock()?;
        let seq = records.len();
        records.push(StoredRecord {
            seq,
            operation,
            a,
            b,
            result,
            date: Utc::now(),
        });
        Ok(())
    }

    async fn query(&self, query: &HistoryQuery) -> Result<Vec<HistoryRecord>> {
        let records = self.lock()?;

        let mut matched: Vec<&StoredRecord> = records
            .iter()
            .filter(|r| match query.operation {
                // An untagged record never matches an operation filter
                Some(operation) => r.operation == Some(operation),
                None => true,
            })
            .collect();

        matched.sort_by(|x, y| {
            let ordering = match query.order_by {
                OrderBy::Date => x.date.cmp(&y.date).then(x.seq.cmp(&y.seq)),
                OrderBy::Result => x.result.total_cmp(&y.result).then(x.seq.cmp(&y.seq)),
            };
            match query.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        Ok(matched
            .into_iter()
            .take(HISTORY_LIMIT)
            .map(|r| HistoryRecord {
                operation: r.operation.unwrap_or(Operation::Sum),
                a: r.a,
                b: r.b,
                result: r.result,
                date: r.date,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_filter_skips_untagged_records() {
        let store = MemoryHistoryStore::new();
        store.append(None, 1.0, 2.0, 3.0).await.unwrap();
        store
            .append(Some(Operation::Sum), 4.0, 5.0, 9.0)
            .await
            .unwrap();

        let query = HistoryQuery {
            operation: Some(Operation::Sum),
            ..Default::default()
        };
        let records = store.query(&query).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].result, 9.0);

        // Without a filter both show up, the untagged one read as sum
        let records = store.query(&HistoryQuery::default()).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.operation == Operation::Sum));
    }

    #[tokio::test]
    async fn test_sort_by_result_both_directions() {
        let store = MemoryHistoryStore::new();
        for result in [3.0, 1.0, 2.0] {
            store
                .append(Some(Operation::Multiply), 1.0, 1.0, result)
                .await
                .unwrap();
        }

        let query = HistoryQuery {
            order_by: OrderBy::Result,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        let results: Vec<f64> = store
            .query(&query)
            .await
            .unwrap()
            .iter()
            .map(|r| r.result)
            .collect();
        assert_eq!(results, vec![1.0, 2.0, 3.0]);

        let query = HistoryQuery {
            order_by: OrderBy::Result,
            sort_order: SortOrder::Desc,
            ..Default::default()
        };
        let results: Vec<f64> = store
            .query(&query)
            .await
            .unwrap()
            .iter()
            .map(|r| r.result)
            .collect();
        assert_eq!(results, vec![3.0, 2.0, 1.0]);
    }

    #[tokio::test]
    async fn test_limit_and_newest_first_default() {
        let store = MemoryHistoryStore::new();
        for i in 0..12 {
            store
                .append(Some(Operation::Sum), 0.0, 0.0, f64::from(i))
                .await
                .unwrap();
        }

        let records = store.query(&HistoryQuery::default()).await.unwrap();
        assert_eq!(records.len(), HISTORY_LIMIT);
        assert_eq!(records[0].result, 11.0);
    }
}
