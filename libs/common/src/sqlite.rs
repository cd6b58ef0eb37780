//! SQLite support built on sqlx

pub mod client;

pub use client::{SqliteClient, SqlitePool};
