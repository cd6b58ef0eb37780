//! Response wire shapes

use serde::Serialize;

use crate::history::HistoryRecord;

/// Legacy single-pair sum response
#[derive(Debug, Serialize)]
pub struct SumResponse {
    pub a: f64,
    pub b: f64,
    pub result: f64,
}

/// History query response
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryRecord>,
}
