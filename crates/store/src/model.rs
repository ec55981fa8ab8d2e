//! Records held by the stores.

use serde::{Deserialize, Serialize};

/// A dish or drink offered on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Display name. Used as an informal key; uniqueness is not enforced.
    pub name: String,

    /// Free-form description, possibly empty.
    pub description: String,

    /// Unit price in dollars.
    pub price: f64,

    /// Calorie count.
    pub calories: u32,

    /// Menu section, e.g. "Entrees". Unknown sections are kept as-is.
    pub category: String,
}

impl MenuItem {
    /// Creates a new menu item.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        calories: u32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
            calories,
            category: category.into(),
        }
    }
}

impl std::fmt::Display for MenuItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} {} ({} calories)",
            self.name,
            self.description,
            format_price(self.price),
            self.calories
        )
    }
}

/// A stock count for one ingredient or supply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Name of the stocked item.
    pub item_name: String,

    /// Units on hand. Negative values are accepted.
    pub quantity: i64,

    /// Free-form category, possibly empty.
    pub category: String,
}

impl InventoryRecord {
    /// Creates a new inventory record.
    pub fn new(item_name: impl Into<String>, quantity: i64, category: impl Into<String>) -> Self {
        Self {
            item_name: item_name.into(),
            quantity,
            category: category.into(),
        }
    }
}

impl std::fmt::Display for InventoryRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.category.is_empty() {
            write!(f, "{}: {}", self.item_name, self.quantity)
        } else {
            write!(f, "{}: {} ({})", self.item_name, self.quantity, self.category)
        }
    }
}

/// Formats a dollar amount with two decimals, e.g. `$10.99`.
pub fn format_price(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${amount:.2}")
    }
}
