//! Domain layer for the menu manager.
//!
//! This crate provides:
//! - the in-memory [`Order`] with subtotal/tax/total pricing
//! - form validation turning raw text input into store records
//! - [`MenuService`] and [`InventoryService`] wrapping the stores

pub mod error;
pub mod forms;
pub mod inventory;
pub mod menu;
pub mod order;

pub use error::DomainError;
pub use forms::{InventoryForm, MenuItemForm, ValidationError};
pub use inventory::InventoryService;
pub use menu::{MenuService, render_menu};
pub use order::{Order, OrderTotals, TAX_RATE};
