//! Core library surface for the personal book catalog.
//!
//! The binary is a thin wrapper: it resolves settings, installs logging and
//! hands a `Catalog` to the menu. Everything it uses is exported here so the
//! store can be driven without the menu as well.
pub mod config;
pub mod error;
pub mod ids;
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;

pub use error::CatalogError;
pub use ids::{IdGenerator, SequentialIds, UuidGenerator};
pub use models::{Book, Status};
pub use store::{Catalog, JsonFileStorage, MemoryStorage, Storage};
pub use ui::run_menu;
