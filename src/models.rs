//! Domain models persisted in the catalog file and passed between the store
//! and the menu. They stay plain data holders; persistence and presentation
//! live elsewhere.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Lending state of a book. Only two values exist and every transition is an
/// explicit user command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "available")]
    Available,
    #[serde(rename = "checked out", alias = "checked-out")]
    CheckedOut,
}

impl Status {
    /// Canonical text used both on disk and on screen.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Available => "available",
            Status::CheckedOut => "checked out",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = CatalogError;

    /// Only the literal values are accepted; no case folding or trimming.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "available" => Ok(Status::Available),
            "checked out" | "checked-out" => Ok(Status::CheckedOut),
            _ => Err(CatalogError::InvalidStatus(raw.to_string())),
        }
    }
}

/// One catalog entry. The field set mirrors the JSON objects in the catalog
/// file exactly; unknown keys make the file unreadable rather than being
/// dropped on the next save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Book {
    /// Generated once by `Catalog::add` and never changed afterwards.
    pub id: String,
    /// Free text as typed; matched case-insensitively by search.
    pub title: String,
    /// Free text as typed; matched case-insensitively by search.
    pub author: String,
    /// Publication year. Kept signed and unvalidated; the catalog does not
    /// second-guess what the user typed.
    pub year: i64,
    /// Lending state, `available` for every new book.
    pub status: Status,
}

impl Book {
    /// Search predicate: case-insensitive substring on title or author, or an
    /// exact textual match on the year. The year never matches by substring,
    /// so `"202"` does not find a book from 2020.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.author.to_lowercase().contains(&needle)
            || query == self.year.to_string()
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Title: {}, Author: {}, Year: {}, Status: {}",
            self.id, self.title, self.author, self.year, self.status
        )
    }
}
