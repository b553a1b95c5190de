//! Search container command

use super::{open_db, CommandResult};
use clap::Args;
use optimizer_store::SqliteRepo;
use std::path::Path;

#[derive(Debug, Args)]
pub struct ContainersArgs {
    pub id: i64,

    /// Remove every search container link instead of listing them
    #[arg(long)]
    pub clear: bool,
}

pub fn execute(db: &Path, args: ContainersArgs) -> CommandResult {
    let conn = open_db(db)?;

    // Fail on unknown ids rather than printing an empty list
    SqliteRepo::load(&conn, args.id)?;

    if args.clear {
        let removed = SqliteRepo::clear_search_containers(&conn, args.id)?;
        println!("Removed {} search container(s)", removed);
    } else {
        for name in SqliteRepo::search_containers_for(&conn, args.id)? {
            println!("{}", name);
        }
    }
    Ok(())
}
