//! Form-layer surface: resolving the edited optimizer and flattening it

pub mod provider;
pub mod sources;

pub use provider::{FormDataProvider, DEFAULT_REQUEST_FIELD};
pub use sources::{CurrentOptimizer, NoCurrentOptimizer, OptimizerLookup, RequestParams};
