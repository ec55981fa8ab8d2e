use async_trait::async_trait;

use crate::{InventoryId, InventoryRecord, Result};

/// Core trait for inventory storage.
///
/// Independent of the catalog: no link between an inventory record and a
/// menu item is enforced.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Inserts a new record and returns its assigned id.
    async fn create(&self, record: &InventoryRecord) -> Result<InventoryId>;

    /// Retrieves a record by id.
    async fn get_by_id(&self, id: InventoryId) -> Result<Option<InventoryRecord>>;

    /// Retrieves the first record (lowest id) with an exactly matching item name.
    async fn get_by_name(&self, item_name: &str) -> Result<Option<(InventoryRecord, InventoryId)>>;

    /// Overwrites every field of the record at `id`.
    ///
    /// Returns false (and changes nothing) if no such record exists.
    async fn update(&self, id: InventoryId, record: &InventoryRecord) -> Result<bool>;

    /// Removes the record at `id`. Returns false if no such record exists.
    async fn delete(&self, id: InventoryId) -> Result<bool>;

    /// Retrieves all records in id order.
    async fn list_all(&self) -> Result<Vec<(InventoryRecord, InventoryId)>>;
}
