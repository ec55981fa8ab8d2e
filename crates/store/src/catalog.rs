use async_trait::async_trait;

use crate::{CategorySet, GroupedMenu, MenuItem, MenuItemId, Result};

/// Core trait for menu catalog storage.
///
/// Each call performs a single statement against the backing store. Lookup
/// misses are returned as `None`/`false`, never as errors.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Inserts a new menu item and returns its assigned id.
    async fn create(&self, item: &MenuItem) -> Result<MenuItemId>;

    /// Retrieves a menu item by id.
    async fn get_by_id(&self, id: MenuItemId) -> Result<Option<MenuItem>>;

    /// Retrieves every item whose name matches exactly, in id order.
    ///
    /// Names are not unique, so more than one row may match.
    async fn find_by_name(&self, name: &str) -> Result<Vec<(MenuItem, MenuItemId)>>;

    /// Overwrites every field of the item at `id`.
    ///
    /// Returns false (and changes nothing) if no such item exists.
    async fn update(&self, id: MenuItemId, item: &MenuItem) -> Result<bool>;

    /// Removes the item at `id`. Returns false if no such item exists.
    async fn delete(&self, id: MenuItemId) -> Result<bool>;

    /// Retrieves all items in id order.
    async fn list_all(&self) -> Result<Vec<(MenuItem, MenuItemId)>>;
}

/// Extension trait providing derived catalog queries.
#[async_trait]
pub trait CatalogStoreExt: CatalogStore {
    /// Retrieves the first item (lowest id) with an exactly matching name.
    async fn get_by_name(&self, name: &str) -> Result<Option<(MenuItem, MenuItemId)>> {
        Ok(self.find_by_name(name).await?.into_iter().next())
    }

    /// Groups all items under the standard four menu sections.
    async fn list_grouped(&self) -> Result<GroupedMenu> {
        self.list_grouped_by(&CategorySet::default()).await
    }

    /// Groups all items under the given sections.
    async fn list_grouped_by(&self, categories: &CategorySet) -> Result<GroupedMenu> {
        let items = self.list_all().await?;
        Ok(GroupedMenu::group(
            categories,
            items.into_iter().map(|(item, _)| item),
        ))
    }
}

// Blanket implementation for all CatalogStore implementations
impl<T: CatalogStore + ?Sized> CatalogStoreExt for T {}
