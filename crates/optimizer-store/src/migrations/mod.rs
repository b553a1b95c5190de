//! Migration framework
//!
//! - Embedded SQL migrations applied in order
//! - Checksums recorded per migration and verified on re-run
//! - Idempotent application

mod checksums;
mod embedded;
mod runner;

pub use runner::{applied_migrations, apply_migrations};
