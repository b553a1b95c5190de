//! Delete command

use super::{open_db, CommandResult};
use clap::Args;
use optimizer_store::SqliteRepo;
use std::path::Path;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: i64,
}

pub fn execute(db: &Path, args: DeleteArgs) -> CommandResult {
    let mut conn = open_db(db)?;
    SqliteRepo::delete(&mut conn, args.id)?;
    println!("Optimizer {} deleted", args.id);
    Ok(())
}
