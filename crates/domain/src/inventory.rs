//! Inventory service.

use store::{InventoryId, InventoryRecord, InventoryStore};

use crate::error::DomainError;
use crate::forms::InventoryForm;

/// Service for maintaining stock counts.
pub struct InventoryService<I: InventoryStore> {
    store: I,
}

impl<I: InventoryStore> InventoryService<I> {
    pub fn new(store: I) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &I {
        &self.store
    }

    /// Adds a new record from a submitted form.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, form: &InventoryForm) -> Result<InventoryId, DomainError> {
        let record = form.validate()?;
        let id = self.store.create(&record).await?;

        metrics::counter!("inventory_records_created_total").increment(1);
        tracing::info!(
            %id,
            item_name = %record.item_name,
            quantity = record.quantity,
            "inventory record created"
        );
        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: InventoryId) -> Result<Option<InventoryRecord>, DomainError> {
        Ok(self.store.get_by_id(id).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_name(
        &self,
        item_name: &str,
    ) -> Result<Option<(InventoryRecord, InventoryId)>, DomainError> {
        Ok(self.store.get_by_name(item_name).await?)
    }

    /// Overwrites a record from a submitted form.
    ///
    /// Returns false if no record has this id.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: InventoryId, form: &InventoryForm) -> Result<bool, DomainError> {
        let record = form.validate()?;
        let updated = self.store.update(id, &record).await?;

        if updated {
            metrics::counter!("inventory_records_updated_total").increment(1);
            tracing::info!(%id, quantity = record.quantity, "inventory record updated");
        }
        Ok(updated)
    }

    /// Removes a record. Returns false if no record has this id.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: InventoryId) -> Result<bool, DomainError> {
        let deleted = self.store.delete(id).await?;
        if deleted {
            metrics::counter!("inventory_records_deleted_total").increment(1);
            tracing::info!(%id, "inventory record deleted");
        }
        Ok(deleted)
    }

    pub async fn list(&self) -> Result<Vec<(InventoryRecord, InventoryId)>, DomainError> {
        Ok(self.store.list_all().await?)
    }
}
