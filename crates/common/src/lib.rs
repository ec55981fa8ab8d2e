//! Shared identifier types for the menu manager workspace.

mod types;

pub use types::{InventoryId, MenuItemId, OrderId};
