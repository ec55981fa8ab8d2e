//! Persistence for the menu manager.
//!
//! Two independent stores share one SQLite database file:
//! - [`CatalogStore`] owns the `menu_items` table
//! - [`InventoryStore`] owns the `inventory` table
//!
//! Each has a SQLite implementation and an in-memory one for tests.

pub mod catalog;
pub mod category;
pub mod error;
pub mod inventory;
pub mod memory;
pub mod model;
pub mod sqlite;

pub use catalog::{CatalogStore, CatalogStoreExt};
pub use category::{CategoryGroup, CategorySet, DEFAULT_CATEGORIES, GroupedMenu};
pub use common::{InventoryId, MenuItemId};
pub use error::{Result, StoreError};
pub use inventory::InventoryStore;
pub use memory::{InMemoryCatalogStore, InMemoryInventoryStore};
pub use model::{InventoryRecord, MenuItem, format_price};
pub use sqlite::{SqliteCatalogStore, SqliteInventoryStore};
