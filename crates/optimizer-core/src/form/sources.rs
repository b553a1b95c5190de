//! Collaborators the form data provider reads from.

use std::collections::HashMap;

use crate::errors::{OptimizerError, Result};
use crate::model::Optimizer;

/// Supplies an optimizer the caller has already resolved, if any
pub trait CurrentOptimizer {
    fn current_optimizer(&self) -> Option<Optimizer>;
}

/// Reads a raw request parameter
pub trait RequestParams {
    fn param(&self, name: &str) -> Option<String>;
}

/// Loads an optimizer by id
#[allow(clippy::result_large_err)]
pub trait OptimizerLookup {
    /// Fetch a persisted optimizer.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::NotFound` when no optimizer has this id, or any
    /// storage error raised while loading it.
    fn get_by_id(&self, id: i64) -> Result<Optimizer>;
}

/// No current optimizer
pub struct NoCurrentOptimizer;

impl CurrentOptimizer for NoCurrentOptimizer {
    fn current_optimizer(&self) -> Option<Optimizer> {
        None
    }
}

impl CurrentOptimizer for Option<Optimizer> {
    fn current_optimizer(&self) -> Option<Optimizer> {
        self.clone()
    }
}

impl CurrentOptimizer for Optimizer {
    fn current_optimizer(&self) -> Option<Optimizer> {
        Some(self.clone())
    }
}

impl RequestParams for HashMap<String, String> {
    fn param(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<const N: usize> RequestParams for [(&str, &str); N] {
    fn param(&self, name: &str) -> Option<String> {
        self.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    }
}

/// Lookup backed by a fixed set of optimizers keyed by id
impl OptimizerLookup for HashMap<i64, Optimizer> {
    fn get_by_id(&self, id: i64) -> Result<Optimizer> {
        self.get(&id)
            .cloned()
            .ok_or_else(|| OptimizerError::NotFound { optimizer_id: id }.into())
    }
}
