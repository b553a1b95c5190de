pub mod containers;
pub mod delete;
pub mod save;
pub mod show;

use rusqlite::Connection;
use std::path::Path;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Open the database, creating its directory and schema when missing
pub fn open_db(path: &Path) -> Result<Connection, Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(optimizer_store::db::open_ready(path)?)
}
