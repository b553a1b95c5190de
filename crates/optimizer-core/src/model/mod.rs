pub mod optimizer;
pub mod value;

pub use optimizer::{fields, FormData, Optimizer, SEARCH_CONTAINER_DELIMITER};
pub use value::FieldValue;
