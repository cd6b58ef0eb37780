//! Shared basic library for the calcsrv workspace.
//!
//! Provides the functions shared by services, including:
//! - logging setup
//! - SQLite client

pub mod logging;

#[cfg(feature = "sqlite")]
pub mod sqlite;
