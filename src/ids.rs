//! Book id generation, injected into the catalog so tests can use
//! predictable ids.

use std::cell::Cell;

use uuid::Uuid;

/// Source of fresh book ids.
pub trait IdGenerator {
    fn generate(&self) -> String;
}

/// Random UUID v4 ids. This is what the binary uses.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `prefix-1`, `prefix-2`, ... ids.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: Cell<u64>,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: Cell::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> String {
        let n = self.next.get();
        self.next.set(n + 1);
        format!("{}-{}", self.prefix, n)
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn generate(&self) -> String {
        (**self).generate()
    }
}
