//! Error type shared by the catalog store and its storage backends.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the catalog store.
///
/// `NotFound`, `InvalidStatus`, `InvalidYear` and `IdExhausted` are
/// user-level outcomes the menu reports and moves past. `Io` and `Corrupt`
/// are storage faults that must reach the user rather than be swallowed. A
/// missing catalog file is not an error at all and never shows up here.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no book with id {0}")]
    NotFound(String),

    #[error("invalid status '{0}'; expected 'available' or 'checked out'")]
    InvalidStatus(String),

    #[error("invalid year '{0}'; the year must be a whole number")]
    InvalidYear(String),

    #[error("failed to access catalog file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("catalog file {} is not valid catalog JSON", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not generate a unique book id after {0} attempts")]
    IdExhausted(usize),
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for failures of the persisted store itself, as opposed to a bad
    /// id, bad input or an id generator that ran dry.
    pub fn is_storage_fault(&self) -> bool {
        matches!(self, CatalogError::Io { .. } | CatalogError::Corrupt { .. })
    }
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;
