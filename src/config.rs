//! Command-line flags and the settings resolved from them.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".book-catalog";
/// Catalog file name stored inside the application data directory.
const CATALOG_FILE_NAME: &str = "library.json";

#[derive(Debug, Parser)]
#[command(name = "book-catalog")]
#[command(about = "Keep track of a personal book collection", long_about = None)]
pub struct Cli {
    /// Catalog file to use (defaults to ~/.book-catalog/library.json)
    #[arg(short, long, env = "BOOK_CATALOG_FILE")]
    pub file: Option<PathBuf>,

    /// Log filter written to stderr, e.g. `info` or `book_catalog=debug`
    #[arg(long, env = "BOOK_CATALOG_LOG", default_value = "warn")]
    pub log_level: String,
}

/// Everything the binary needs once flags and environment are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub catalog_path: PathBuf,
    pub log_level: String,
}

impl Settings {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let catalog_path = match cli.file {
            Some(path) => path,
            None => default_catalog_path()?,
        };
        Ok(Self {
            catalog_path,
            log_level: cli.log_level,
        })
    }
}

/// Resolve the catalog file inside the user's home.
pub fn default_catalog_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs
        .home_dir()
        .join(DATA_DIR_NAME)
        .join(CATALOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_file_wins() {
        let cli = Cli::try_parse_from(["book-catalog", "--file", "/tmp/books.json"]).unwrap();
        let settings = Settings::from_cli(cli).unwrap();
        assert_eq!(settings.catalog_path, PathBuf::from("/tmp/books.json"));
    }

    #[test]
    fn log_level_flag_is_kept() {
        let cli = Cli::try_parse_from([
            "book-catalog",
            "--file",
            "books.json",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(Settings::from_cli(cli).unwrap().log_level, "debug");
    }

    #[test]
    fn default_path_lives_in_data_dir() {
        if let Ok(path) = default_catalog_path() {
            assert!(path.ends_with(".book-catalog/library.json"));
        }
    }
}
