//! Endpoint handlers
//!
//! Query parameters are parsed by hand so unsupported literals surface as a
//! 400 `{detail}` payload instead of the framework's plain-text rejection.

use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::dto::{HistoryResponse, SumResponse};
use crate::api::AppState;
use crate::batch::{self, BatchItem, BatchOutcome};
use crate::calculator::{self, Operation};
use crate::error::{CalcSrvError, Result};
use crate::history::{HistoryQuery, OrderBy, SortOrder};

/// Service health probe
///
/// @route GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "calcsrv",
        "timestamp": Utc::now().to_rfc3339()
    }))
}

/// Add two numbers passed as query parameters (legacy endpoint)
///
/// @route GET /calculadora-fast-api/sum
/// @input ?a=<float>&b=<float>
/// @output Json - {a, b, result}
///
/// The history record is written without an operation tag, like every record
/// this endpoint has produced. A validation failure returns the flattened
/// error payload with status 400.
pub async fn sum(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<SumResponse>> {
    let a = float_param(&params, "a")?;
    let b = float_param(&params, "b")?;

    let result = calculator::evaluate("sum", &[a, b])?;
    state.store.append(None, a, b, result).await?;

    Ok(Json(SumResponse { a, b, result }))
}

/// Run a list of operations, one outcome per item
///
/// @route POST /calculadora-fast-api/batch_operations
/// @input Json - array of {op, nums}
/// @output Json - array of {op, result} or {error, operation, operandos},
///         positionally aligned with the input
pub async fn batch_operations(
    State(state): State<Arc<AppState>>,
    Json(items): Json<Vec<BatchItem>>,
) -> Result<Json<Vec<BatchOutcome>>> {
    let outcomes = batch::run_batch(state.store.as_ref(), &items).await?;
    Ok(Json(outcomes))
}

/// Query the calculation history
///
/// @route GET /calculadora-fast-api/history
/// @input ?operation=<sum|subtract|multiply|divide>&order_by=<date|result>&sort_order=<asc|desc>
/// @output Json - {history: [{operation, a, b, result, date}]}, newest first
///         by default, at most 10 records
pub async fn history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<HistoryResponse>> {
    let query = parse_history_query(&params)?;
    let records = state.store.query(&query).await?;
    Ok(Json(HistoryResponse { history: records }))
}

fn float_param(params: &HashMap<String, String>, name: &str) -> Result<f64> {
    let raw = params.get(name).ok_or_else(|| {
        CalcSrvError::InvalidParameter(format!("Missing required query parameter '{}'", name))
    })?;
    raw.parse().map_err(|_| {
        CalcSrvError::InvalidParameter(format!(
            "Query parameter '{}' must be a number, got '{}'",
            name, raw
        ))
    })
}

fn parse_history_query(params: &HashMap<String, String>) -> Result<HistoryQuery> {
    let mut query = HistoryQuery::default();

    if let Some(raw) = params.get("operation") {
        query.operation =
            Some(Operation::parse(raw).ok_or_else(|| invalid_literal("operation", raw))?);
    }
    if let Some(raw) = params.get("order_by") {
        query.order_by = OrderBy::parse(raw).ok_or_else(|| invalid_literal("order_by", raw))?;
    }
    if let Some(raw) = params.get("sort_order") {
        query.sort_order =
            SortOrder::parse(raw).ok_or_else(|| invalid_literal("sort_order", raw))?;
    }

    Ok(query)
}

fn invalid_literal(name: &str, value: &str) -> CalcSrvError {
    CalcSrvError::InvalidParameter(format!("Invalid value '{}' for parameter '{}'", value, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_float_param() {
        let p = params(&[("a", "3.5")]);
        assert_eq!(float_param(&p, "a").unwrap(), 3.5);

        let err = float_param(&p, "b").unwrap_err();
        assert!(err.to_string().contains("Missing required query parameter 'b'"));

        let p = params(&[("a", "abc")]);
        let err = float_param(&p, "a").unwrap_err();
        assert!(err.to_string().contains("must be a number"));
    }

    #[test]
    fn test_parse_history_query_defaults() {
        let query = parse_history_query(&params(&[])).unwrap();
        assert_eq!(query.operation, None);
        assert_eq!(query.order_by, OrderBy::Date);
        assert_eq!(query.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_parse_history_query_full() {
        let p = params(&[
            ("operation", "multiply"),
            ("order_by", "result"),
            ("sort_order", "asc"),
        ]);
        let query = parse_history_query(&p).unwrap();
        assert_eq!(query.operation, Some(Operation::Multiply));
        assert_eq!(query.order_by, OrderBy::Result);
        assert_eq!(query.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_parse_history_query_rejects_bad_literals() {
        let err = parse_history_query(&params(&[("order_by", "size")])).unwrap_err();
        assert!(err
            .to_string()
            .contains("Invalid value 'size' for parameter 'order_by'"));

        let err = parse_history_query(&params(&[("operation", "modulo")])).unwrap_err();
        assert!(err
            .to_string()
            .contains("Invalid value 'modulo' for parameter 'operation'"));
    }
}
