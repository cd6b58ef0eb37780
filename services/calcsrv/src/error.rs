//! Error handling for CalcSrv
//!
//! Two error families leave this service: per-item validation failures
//! (`CalcError`, returned inline inside batch responses and flattened on the
//! legacy 400 path) and transport/storage failures mapped to HTTP statuses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::calculator::CalcError;

/// Result type alias
pub type Result<T> = std::result::Result<T, CalcSrvError>;

#[derive(Debug, Error)]
pub enum CalcSrvError {
    /// Operation validation failure (legacy single-item path)
    #[error("{0}")]
    Validation(#[from] CalcError),

    /// Malformed or unsupported query parameter
    #[error("{0}")]
    InvalidParameter(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<sqlx::Error> for CalcSrvError {
    fn from(err: sqlx::Error) -> Self {
        CalcSrvError::Database(err.to_string())
    }
}

impl IntoResponse for CalcSrvError {
    fn into_response(self) -> Response {
        match self {
            // The legacy single-item path returns the validation error
            // flattened, not wrapped in a `detail` envelope.
            CalcSrvError::Validation(err) => {
                (StatusCode::BAD_REQUEST, Json(err)).into_response()
            }
            CalcSrvError::InvalidParameter(msg) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": msg })),
            )
                .into_response(),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": other.to_string() })),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = CalcSrvError::Database("disk full".to_string());
        assert_eq!(format!("{}", error), "Database error: disk full");

        let error = CalcSrvError::InvalidParameter("bad value".to_string());
        assert_eq!(format!("{}", error), "bad value");
    }
}
