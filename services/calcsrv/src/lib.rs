//! CalcSrv - calculator API service
//!
//! Exposes arithmetic operations over HTTP (a legacy single-pair sum endpoint
//! and a batch endpoint for sum/subtract/multiply/divide over N operands) and
//! a query endpoint over the persisted calculation history.

pub mod api;
pub mod batch;
pub mod calculator;
pub mod config;
pub mod error;
pub mod history;

pub use error::{CalcSrvError, Result};
