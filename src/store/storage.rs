//! Storage backends for the catalog. Both keep the whole collection as one
//! unit; there is no per-record update path.

use std::cell::{Cell, RefCell};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::models::Book;

/// Whole-catalog persistence. Every operation reads the full collection and
/// writes the full collection back, so a backend only has to get these two
/// calls right.
pub trait Storage {
    /// Read the entire catalog. A store that was never written yields an
    /// empty catalog.
    fn load(&self) -> Result<Vec<Book>>;

    /// Replace the entire catalog. Readers must see either the old or the new
    /// content, never a mix.
    fn save(&self, books: &[Book]) -> Result<()>;
}

/// Catalog kept as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Point the storage at `path`. Nothing is touched on disk until the
    /// first `load` or `save`, and a missing file is fine.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sibling file the new content is staged in before the rename.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_staged(&self, staging: &Path, contents: &[u8]) -> io::Result<()> {
        let mut file = File::create(staging)?;
        file.write_all(contents)?;
        file.sync_all()?;
        fs::rename(staging, &self.path)
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<Vec<Book>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "catalog file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(CatalogError::io(&self.path, err)),
        };

        let books: Vec<Book> =
            serde_json::from_str(&contents).map_err(|source| CatalogError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), count = books.len(), "loaded catalog");
        Ok(books)
    }

    fn save(&self, books: &[Book]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| CatalogError::io(parent, err))?;
        }

        let serialized = serde_json::to_vec_pretty(books).map_err(|source| {
            CatalogError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;

        let staging = self.staging_path();
        if let Err(err) = self.write_staged(&staging, &serialized) {
            // The target is untouched; only the staging file may be left over.
            let _ = fs::remove_file(&staging);
            return Err(CatalogError::io(&self.path, err));
        }

        debug!(path = %self.path.display(), count = books.len(), "saved catalog");
        Ok(())
    }
}

/// In-process catalog, handy for embedding and for tests that do not care
/// about the file format.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    books: RefCell<Vec<Book>>,
    loads: Cell<usize>,
    saves: Cell<usize>,
}

impl MemoryStorage {
    /// Start from an existing set of books instead of an empty catalog.
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: RefCell::new(books),
            ..Self::default()
        }
    }

    /// Number of `load` calls so far.
    pub fn load_count(&self) -> usize {
        self.loads.get()
    }

    /// Number of successful `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Vec<Book>> {
        self.loads.set(self.loads.get() + 1);
        Ok(self.books.borrow().clone())
    }

    fn save(&self, books: &[Book]) -> Result<()> {
        *self.books.borrow_mut() = books.to_vec();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn load(&self) -> Result<Vec<Book>> {
        (**self).load()
    }

    fn save(&self, books: &[Book]) -> Result<()> {
        (**self).save(books)
    }
}
