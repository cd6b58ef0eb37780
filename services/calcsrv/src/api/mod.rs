//! HTTP API surface
//!
//! Route table and shared state. The history store is injected so tests run
//! the router against the in-memory implementation.

pub mod dto;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::history::HistoryStore;

/// Application state shared by all handlers
pub struct AppState {
    pub store: Arc<dyn HistoryStore>,
}

/// Build the service router.
pub fn create_router(store: Arc<dyn HistoryStore>) -> Router {
    let state = Arc::new(AppState { store });

    Router::new()
        .route("/health", get(handlers::health))
        .route("/calculadora-fast-api/sum", get(handlers::sum))
        .route(
            "/calculadora-fast-api/batch_operations",
            post(handlers::batch_operations),
        )
        .route("/calculadora-fast-api/history", get(handlers::history))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
