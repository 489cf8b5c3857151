//! Binary entry point: resolve where the catalog lives, then run the menu on
//! the terminal until the user exits.
use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::Parser;
use tracing::info;

use book_catalog::config::{Cli, Settings};
use book_catalog::{logging, run_menu, Catalog, JsonFileStorage, UuidGenerator};

/// Returning a `Result` sends storage faults (unreadable or corrupt catalog,
/// failed writes) to the terminal with their full context and a non-zero
/// exit code.
fn main() -> Result<()> {
    let settings = Settings::from_cli(Cli::parse())?;
    logging::init(&settings.log_level);
    info!(path = %settings.catalog_path.display(), "opening catalog");

    let catalog = Catalog::new(JsonFileStorage::new(&settings.catalog_path), UuidGenerator);
    let styled = io::stdout().is_terminal();
    run_menu(&catalog, io::stdin().lock(), io::stdout().lock(), styled)
}
