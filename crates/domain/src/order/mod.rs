//! The order being assembled for checkout.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use common::OrderId;
use serde::Serialize;
use store::{MenuItem, format_price};

/// Sales tax applied to every order subtotal.
pub const TAX_RATE: f64 = 0.07;

/// Computed price breakdown of an order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl OrderTotals {
    /// Derives tax and total from a subtotal at [`TAX_RATE`].
    pub fn from_subtotal(subtotal: f64) -> Self {
        let tax = subtotal * TAX_RATE;
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

/// A transient selection of catalog items.
///
/// Items are shared with whoever loaded them from the catalog; the order
/// never writes back to the store. Adding the same item twice records two
/// purchases. Totals are derived on every call and never cached.
#[derive(Debug, Clone)]
pub struct Order {
    id: OrderId,
    opened_at: DateTime<Utc>,
    items: Vec<Arc<MenuItem>>,
}

impl Order {
    /// Opens a new empty order.
    pub fn new() -> Self {
        Self::with_id(OrderId::new())
    }

    fn with_id(id: OrderId) -> Self {
        Self {
            id,
            opened_at: Utc::now(),
            items: Vec::new(),
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Appends an item.
    pub fn add(&mut self, item: impl Into<Arc<MenuItem>>) {
        self.items.push(item.into());
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates items in the order they were added.
    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.iter().map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sums item prices and applies tax. An empty order totals zero.
    pub fn compute_totals(&self) -> OrderTotals {
        let subtotal = self.items.iter().fold(0.0, |sum, item| sum + item.price);
        OrderTotals::from_subtotal(subtotal)
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Order:")?;
        for (i, item) in self.items().enumerate() {
            writeln!(f, "{}. {}", i + 1, item)?;
        }

        let totals = self.compute_totals();
        let rate_percent = (TAX_RATE * 10_000.0).round() / 100.0;
        writeln!(f, "Subtotal: {}", format_price(totals.subtotal))?;
        writeln!(f, "Tax ({rate_percent}%): {}", format_price(totals.tax))?;
        write!(f, "Total: {}", format_price(totals.total))
    }
}
