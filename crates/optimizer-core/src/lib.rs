//! Optimizer Core - in-memory optimizer entity and its collaborators
//!
//! This crate provides:
//! - The `Optimizer` entity with permissive, coercing accessors
//! - The structured error facility (`ExError`, `ExErrorKind`)
//! - The structured logging facility and its macros
//! - The form data provider and the traits it resolves optimizers through
//!
//! Persistence lives in `optimizer-store`.

pub mod errors;
pub mod form;
pub mod logging_facility;
pub mod model;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, OptimizerError, Result};
pub use form::{CurrentOptimizer, FormDataProvider, OptimizerLookup, RequestParams};
pub use model::{FieldValue, FormData, Optimizer};
