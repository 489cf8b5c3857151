use tracing::{info, warn};

use crate::error::{CatalogError, Result};
use crate::ids::IdGenerator;
use crate::models::{Book, Status};

use super::storage::Storage;

/// How many times `add` asks the generator for an id before giving up on a
/// generator that keeps returning ids already in use.
const MAX_ID_ATTEMPTS: usize = 16;

/// The catalog store. Nothing is cached between calls: each operation loads
/// the full catalog, works on it in memory, and writes it back only when
/// something changed.
#[derive(Debug)]
pub struct Catalog<S, G> {
    storage: S,
    ids: G,
}

impl<S: Storage, G: IdGenerator> Catalog<S, G> {
    /// Build a catalog over `storage`, drawing new book ids from `ids`.
    pub fn new(storage: S, ids: G) -> Self {
        Self { storage, ids }
    }

    /// The backend this catalog reads from and writes to.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read every record in catalog order.
    pub fn load(&self) -> Result<Vec<Book>> {
        self.storage.load()
    }

    /// Replace the persisted catalog with `books`.
    pub fn save(&self, books: &[Book]) -> Result<()> {
        self.storage.save(books)
    }

    /// Append a new `available` book and return its id.
    pub fn add(&self, title: &str, author: &str, year: i64) -> Result<String> {
        let mut books = self.load()?;
        let id = self.fresh_id(&books)?;

        books.push(Book {
            id: id.clone(),
            title: title.to_string(),
            author: author.to_string(),
            year,
            status: Status::default(),
        });
        self.save(&books)?;

        info!(%id, title, "added book");
        Ok(id)
    }

    /// Remove the book with `id`. Nothing is written when no record matches.
    pub fn delete(&self, id: &str) -> Result<()> {
        let books = self.load()?;
        let before = books.len();
        let remaining: Vec<Book> = books.into_iter().filter(|book| book.id != id).collect();

        if remaining.len() == before {
            return Err(CatalogError::NotFound(id.to_string()));
        }

        self.save(&remaining)?;
        info!(id, "deleted book");
        Ok(())
    }

    /// Books whose title or author contains `query` (ignoring case), or whose
    /// year is exactly `query`. Results keep catalog order.
    pub fn search(&self, query: &str) -> Result<Vec<Book>> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|book| book.matches(query))
            .collect())
    }

    /// Set the lending status of the book with `id`. The status text is
    /// validated before storage is touched.
    pub fn update_status(&self, id: &str, new_status: &str) -> Result<()> {
        let status = new_status.parse::<Status>().inspect_err(|_| {
            warn!(id, new_status, "rejected status update");
        })?;

        let mut books = self.load()?;
        let Some(book) = books.iter_mut().find(|book| book.id == id) else {
            return Err(CatalogError::NotFound(id.to_string()));
        };
        book.status = status;
        self.save(&books)?;

        info!(id, %status, "updated book status");
        Ok(())
    }

    /// Every book in catalog order. An empty vector means the library is empty.
    pub fn list(&self) -> Result<Vec<Book>> {
        self.load()
    }

    fn fresh_id(&self, books: &[Book]) -> Result<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = self.ids.generate();
            if !books.iter().any(|book| book.id == candidate) {
                return Ok(candidate);
            }
            warn!(id = %candidate, "generated id already in use, drawing again");
        }
        Err(CatalogError::IdExhausted(MAX_ID_ATTEMPTS))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::ids::SequentialIds;
    use crate::store::MemoryStorage;

    fn catalog() -> Catalog<MemoryStorage, SequentialIds> {
        Catalog::new(MemoryStorage::default(), SequentialIds::new("book"))
    }

    /// Generator stuck on a single value.
    struct Fixed(&'static str);

    impl IdGenerator for Fixed {
        fn generate(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn add_appends_available_book() {
        let catalog = catalog();
        let id = catalog.add("Dune", "Frank Herbert", 1965).unwrap();
        assert_eq!(id, "book-1");

        let books = catalog.list().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Dune");
        assert_eq!(books[0].status, Status::Available);
    }

    #[test]
    fn add_keeps_insertion_order_and_unique_ids() {
        let catalog = catalog();
        for n in 0..10 {
            catalog.add(&format!("Title {n}"), "Author", 2000 + n).unwrap();
        }
        let books = catalog.list().unwrap();
        let ids: HashSet<_> = books.iter().map(|b| b.id.clone()).collect();
        assert_eq!(ids.len(), 10);
        assert_eq!(books[0].title, "Title 0");
        assert_eq!(books[9].title, "Title 9");
    }

    #[test]
    fn add_refuses_a_generator_that_only_repeats() {
        let catalog = Catalog::new(MemoryStorage::default(), Fixed("same"));
        catalog.add("One", "A", 1).unwrap();
        let err = catalog.add("Two", "B", 2).unwrap_err();
        assert!(matches!(err, CatalogError::IdExhausted(_)));
        assert_eq!(catalog.list().unwrap().len(), 1);
    }

    #[test]
    fn delete_missing_id_does_not_save() {
        let catalog = catalog();
        catalog.add("Dune", "Frank Herbert", 1965).unwrap();
        let saves = catalog.storage().save_count();

        let err = catalog.delete("nope").unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(ref id) if id == "nope"));
        assert_eq!(catalog.storage().save_count(), saves);
    }

    #[test]
    fn delete_twice_reports_not_found() {
        let catalog = catalog();
        let id = catalog.add("Dune", "Frank Herbert", 1965).unwrap();
        catalog.add("Emma", "Jane Austen", 1815).unwrap();

        catalog.delete(&id).unwrap();
        assert!(matches!(catalog.delete(&id), Err(CatalogError::NotFound(_))));
        let books = catalog.list().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Emma");
    }

    #[test]
    fn invalid_status_touches_nothing() {
        let catalog = catalog();
        let id = catalog.add("Dune", "Frank Herbert", 1965).unwrap();
        let loads = catalog.storage().load_count();
        let saves = catalog.storage().save_count();

        let err = catalog.update_status(&id, "borrowed").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidStatus(_)));
        assert_eq!(catalog.storage().load_count(), loads);
        assert_eq!(catalog.storage().save_count(), saves);
        assert_eq!(catalog.list().unwrap()[0].status, Status::Available);
    }

    #[test]
    fn generator_exhaustion_is_not_a_storage_fault() {
        let catalog = Catalog::new(MemoryStorage::default(), Fixed("same"));
        catalog.add("One", "A", 1).unwrap();
        let err = catalog.add("Two", "B", 2).unwrap_err();
        assert!(!err.is_storage_fault());
    }

    #[test]
    fn update_status_unknown_id_skips_save() {
        let catalog = catalog();
        catalog.add("Dune", "Frank Herbert", 1965).unwrap();
        let saves = catalog.storage().save_count();

        let err = catalog.update_status("ghost", "checked out").unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
        assert_eq!(catalog.storage().save_count(), saves);
    }

    #[test]
    fn update_status_round_trips_between_states() {
        let catalog = catalog();
        let id = catalog.add("Dune", "Frank Herbert", 1965).unwrap();

        catalog.update_status(&id, "checked-out").unwrap();
        assert_eq!(catalog.list().unwrap()[0].status, Status::CheckedOut);
        catalog.update_status(&id, "available").unwrap();
        assert_eq!(catalog.list().unwrap()[0].status, Status::Available);
    }

    #[test]
    fn search_preserves_catalog_order() {
        let catalog = catalog();
        catalog.add("The Hobbit", "J. R. R. Tolkien", 1937).unwrap();
        catalog.add("Dune", "Frank Herbert", 1965).unwrap();
        catalog.add("The Silmarillion", "J. R. R. Tolkien", 1977).unwrap();

        let titles: Vec<_> = catalog
            .search("tolkien")
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, ["The Hobbit", "The Silmarillion"]);
        assert!(catalog.search("pratchett").unwrap().is_empty());
    }
}
