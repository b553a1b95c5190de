//! Show command

use super::{open_db, CommandResult};
use clap::Args;
use optimizer_core::form::{FormDataProvider, NoCurrentOptimizer, DEFAULT_REQUEST_FIELD};
use optimizer_store::SqliteOptimizerLookup;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Optimizer id, as it would arrive in a request
    pub id: String,
}

pub fn execute(db: &Path, args: ShowArgs) -> CommandResult {
    let conn = open_db(db)?;
    let lookup = SqliteOptimizerLookup::new(&conn);
    let provider = FormDataProvider::new(&lookup);

    let request = HashMap::from([(DEFAULT_REQUEST_FIELD.to_string(), args.id)]);
    let data = provider.data(&NoCurrentOptimizer, &request)?;

    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}
