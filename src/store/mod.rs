//! Catalog persistence split into the storage backend and the operations
//! built on top of it.

mod catalog;
mod storage;

pub use catalog::Catalog;
pub use storage::{JsonFileStorage, MemoryStorage, Storage};
