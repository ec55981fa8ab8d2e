use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row identifier of a persisted menu item.
///
/// Assigned by the database on insert; wraps the SQLite `INTEGER PRIMARY KEY`
/// so catalog ids cannot be mixed up with inventory ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(i64);

impl MenuItemId {
    /// Wraps a raw row id.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row id.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MenuItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<MenuItemId> for i64 {
    fn from(id: MenuItemId) -> Self {
        id.0
    }
}

/// Row identifier of a persisted inventory record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryId(i64);

impl InventoryId {
    /// Wraps a raw row id.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row id.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for InventoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for InventoryId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<InventoryId> for i64 {
    fn from(id: InventoryId) -> Self {
        id.0
    }
}

/// Identifier of an open (in-memory) order.
///
/// Orders are never persisted, so this is a random UUID rather than a row id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Creates a new random order ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an order ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for OrderId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
