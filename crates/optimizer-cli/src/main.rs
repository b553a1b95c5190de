//! Optimizer CLI
//!
//! Command-line interface for inspecting and editing persisted optimizers

use clap::{Parser, Subcommand};
use optimizer_core::logging_facility::{self, Profile};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "optimizer")]
#[command(about = "Optimizer - search optimizer persistence", long_about = None)]
struct Cli {
    /// SQLite database file (created and migrated on first use)
    #[arg(long, global = true, default_value = ".optimizer/store.db")]
    db: PathBuf,

    /// Emit JSON structured logs instead of human-readable ones
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the form data snapshot of an optimizer
    Show(commands::show::ShowArgs),
    /// Create or update an optimizer from a JSON file
    Save(commands::save::SaveArgs),
    /// Delete an optimizer and its search container links
    Delete(commands::delete::DeleteArgs),
    /// List or clear the search containers of an optimizer
    Containers(commands::containers::ContainersArgs),
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(if cli.json_logs {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = match cli.command {
        Commands::Show(args) => commands::show::execute(&cli.db, args),
        Commands::Save(args) => commands::save::execute(&cli.db, args),
        Commands::Delete(args) => commands::delete::execute(&cli.db, args),
        Commands::Containers(args) => commands::containers::execute(&cli.db, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
