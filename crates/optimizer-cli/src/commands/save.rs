//! Save command

use super::{open_db, CommandResult};
use clap::Args;
use optimizer_core::errors::{ExError, ExErrorKind};
use optimizer_core::model::{fields, FieldValue, Optimizer};
use optimizer_store::SqliteRepo;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

const OP_READ_INPUT: &str = "read_input";

#[derive(Debug, Args)]
pub struct SaveArgs {
    /// JSON object with optimizer fields
    pub file: PathBuf,
}

pub fn execute(db: &Path, args: SaveArgs) -> CommandResult {
    let data = read_object(&args.file)?;
    let mut conn = open_db(db)?;

    // A named id is an update: start from the stored row so omitted fields survive
    let existing_id = data
        .get(fields::OPTIMIZER_ID)
        .map(|value| FieldValue::from(value).to_int())
        .filter(|id| *id > 0);
    let mut optimizer = match existing_id {
        Some(id) => SqliteRepo::load(&conn, id)?,
        None => Optimizer::new(),
    };
    optimizer.apply_data(&data);

    let id = SqliteRepo::save(&mut conn, &mut optimizer)?;
    println!("Optimizer saved:");
    println!("  optimizer_id: {}", id);
    println!("  search_container: {}", optimizer.search_container());
    Ok(())
}

fn read_object(path: &Path) -> Result<Map<String, Value>, ExError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op(OP_READ_INPUT)
            .with_message(format!("{}: {}", path.display(), e))
    })?;

    let invalid = |message: String| {
        ExError::new(ExErrorKind::InvalidInput)
            .with_op(OP_READ_INPUT)
            .with_message(message)
    };
    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(invalid(format!(
            "{} must contain a JSON object",
            path.display()
        ))),
        Err(e) => Err(invalid(format!("{}: {}", path.display(), e))),
    }
}
