//! Repository layer mapping optimizers to SQLite

pub mod lookup;
mod serialization;
pub mod sqlite_repo;

pub use lookup::SqliteOptimizerLookup;
pub use sqlite_repo::SqliteRepo;
