//! Batch operation orchestration
//!
//! Runs every item of a batch independently: a failed item contributes its
//! structured error to the response array without aborting the rest, and the
//! outputs stay positionally aligned with the inputs.

use serde::{Deserialize, Serialize};

use crate::calculator::{self, CalcError};
use crate::error::Result;
use crate::history::HistoryStore;

/// One operation request inside a batch call
#[derive(Debug, Clone, Deserialize)]
pub struct BatchItem {
    pub op: String,
    pub nums: Vec<f64>,
}

/// Per-item outcome. Success and error shapes share the response array.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchOutcome {
    Success { op: String, result: f64 },
    Error(CalcError),
}

/// Evaluate every item, persisting the successful ones.
///
/// The negativity check here mirrors the calculator's first check so both
/// layers reject identically. Storage failures are not per-item validation
/// errors and propagate to the caller.
pub async fn run_batch(store: &dyn HistoryStore, items: &[BatchItem]) -> Result<Vec<BatchOutcome>> {
    let mut outcomes = Vec::with_capacity(items.len());

    for item in items {
        if let Some(num) = item.nums.iter().find(|n| **n < 0.0) {
            outcomes.push(BatchOutcome::Error(CalcError::negative(
                *num, &item.op, &item.nums,
            )));
            continue;
        }

        match calculator::evaluate_item(&item.op, &item.nums) {
            Ok((operation, result)) => {
                // Only the first two operands are recorded, whatever the
                // operand count; the stored data has always had this shape.
                store
                    .append(Some(operation), item.nums[0], item.nums[1], result)
                    .await?;
                outcomes.push(BatchOutcome::Success {
                    op: item.op.clone(),
                    result,
                });
            }
            Err(err) => outcomes.push(BatchOutcome::Error(err)),
        }
    }

    Ok(outcomes)
}
