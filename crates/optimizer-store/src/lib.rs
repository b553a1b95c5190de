//! Optimizer Store - SQLite persistence for optimizers
//!
//! Provides:
//! - Schema migrations with checksums
//! - `SqliteRepo`, the mapper between `Optimizer` and its two tables
//! - `SqliteOptimizerLookup` for the form data provider

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use repo::{SqliteOptimizerLookup, SqliteRepo};
