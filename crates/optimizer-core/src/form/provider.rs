//! Form data provider
//!
//! Resolves the optimizer being edited and flattens it for the form layer.
//! Resolution order:
//! 1. the optimizer supplied by the caller
//! 2. the id in the request parameter, loaded through the lookup
//! 3. a new empty optimizer

#![allow(clippy::result_large_err)]

use super::sources::{CurrentOptimizer, OptimizerLookup, RequestParams};
use crate::errors::{OptimizerError, Result};
use crate::model::{fields, FormData, Optimizer};

/// Default name of the request parameter carrying the optimizer id
pub const DEFAULT_REQUEST_FIELD: &str = fields::OPTIMIZER_ID;

/// Produces the flat optimizer snapshot a form renders from
pub struct FormDataProvider<'a> {
    request_field_name: String,
    lookup: &'a dyn OptimizerLookup,
}

impl<'a> FormDataProvider<'a> {
    pub fn new(lookup: &'a dyn OptimizerLookup) -> Self {
        Self {
            request_field_name: DEFAULT_REQUEST_FIELD.to_string(),
            lookup,
        }
    }

    /// Read the id from a different request parameter
    pub fn with_request_field(mut self, name: impl Into<String>) -> Self {
        self.request_field_name = name.into();
        self
    }

    pub fn request_field_name(&self) -> &str {
        &self.request_field_name
    }

    /// Resolve the optimizer this form is about
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::NotFound` when the request names an id that
    /// does not exist or is not numeric.
    pub fn current_optimizer(
        &self,
        current: &dyn CurrentOptimizer,
        request: &dyn RequestParams,
    ) -> Result<Optimizer> {
        if let Some(optimizer) = current.current_optimizer() {
            return Ok(optimizer);
        }

        let raw_id = request
            .param(&self.request_field_name)
            .filter(|raw| !raw.is_empty());

        let loaded = match raw_id {
            Some(raw) => {
                let id: i64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| OptimizerError::NonNumericId { raw: raw.clone() })?;
                Some(self.lookup.get_by_id(id)?)
            }
            None => None,
        };

        Ok(loaded
            .filter(|optimizer| optimizer.id().is_some())
            .unwrap_or_default())
    }

    /// Snapshot of the resolved optimizer, empty unless it has been persisted
    ///
    /// # Errors
    ///
    /// Propagates resolution failures from [`Self::current_optimizer`].
    pub fn data(
        &self,
        current: &dyn CurrentOptimizer,
        request: &dyn RequestParams,
    ) -> Result<FormData> {
        let optimizer = self.current_optimizer(current, request)?;
        if optimizer.id().is_none() {
            return Ok(FormData::new());
        }
        Ok(optimizer.data())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;
    use crate::form::sources::NoCurrentOptimizer;
    use std::collections::HashMap;

    fn persisted(id: i64, name: &str) -> Optimizer {
        let mut optimizer = Optimizer::new();
        optimizer.assign_id(id);
        optimizer.set_name(name);
        optimizer
    }

    #[test]
    fn test_current_optimizer_wins_over_request() {
        let lookup = HashMap::from([(2_i64, persisted(2, "From lookup"))]);
        let provider = FormDataProvider::new(&lookup);
        let request = &[("optimizer_id", "2")];

        let current = Some(persisted(1, "Current"));
        let resolved = provider.current_optimizer(&current, request).unwrap();

        assert_eq!(resolved.name(), "Current");
    }

    #[test]
    fn test_empty_request_yields_new_optimizer() {
        let lookup: HashMap<i64, Optimizer> = HashMap::new();
        let provider = FormDataProvider::new(&lookup);
        let request = &[("optimizer_id", "")];

        let resolved = provider
            .current_optimizer(&NoCurrentOptimizer, request)
            .unwrap();

        assert_eq!(resolved, Optimizer::new());
        assert!(provider
            .data(&NoCurrentOptimizer, request)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_custom_request_field() {
        let lookup = HashMap::from([(4_i64, persisted(4, "Custom"))]);
        let provider = FormDataProvider::new(&lookup).with_request_field("id");
        let request = &[("id", " 4 ")];

        let data = provider.data(&NoCurrentOptimizer, request).unwrap();

        assert_eq!(provider.request_field_name(), "id");
        assert_eq!(data.get("name"), Some(&serde_json::json!("Custom")));
    }

    #[test]
    fn test_non_numeric_id_is_not_found() {
        let lookup: HashMap<i64, Optimizer> = HashMap::new();
        let provider = FormDataProvider::new(&lookup);
        let request = &[("optimizer_id", "abc")];

        let err = provider
            .current_optimizer(&NoCurrentOptimizer, request)
            .unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert_eq!(err.entity_id(), Some("abc"));
    }
}
