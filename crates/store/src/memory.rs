use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    CatalogStore, InventoryId, InventoryRecord, InventoryStore, MenuItem, MenuItemId, Result,
};

/// Rows keyed by id, handing out ids the way an SQLite rowid table does:
/// one past the current maximum.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
}

impl<T: Clone> Table<T> {
    fn insert(&mut self, row: T) -> i64 {
        let id = self.rows.keys().next_back().map_or(1, |max| max + 1);
        self.rows.insert(id, row);
        id
    }

    fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn replace(&mut self, id: i64, row: T) -> bool {
        match self.rows.get_mut(&id) {
            Some(slot) => {
                *slot = row;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, id: i64) -> bool {
        self.rows.remove(&id).is_some()
    }

    fn matching(&self, pred: impl Fn(&T) -> bool) -> impl Iterator<Item = (i64, &T)> {
        self.rows
            .iter()
            .filter(move |(_, row)| pred(*row))
            .map(|(id, row)| (*id, row))
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

/// In-memory catalog store implementation for testing.
///
/// Provides the same interface and id assignment as the SQLite implementation.
#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    items: Arc<RwLock<Table<MenuItem>>>,
}

impl InMemoryCatalogStore {
    /// Creates a new empty in-memory catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of items stored.
    pub async fn len(&self) -> usize {
        self.items.read().await.rows.len()
    }

    /// Returns true if no items are stored.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.rows.is_empty()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn create(&self, item: &MenuItem) -> Result<MenuItemId> {
        let id = self.items.write().await.insert(item.clone());
        Ok(MenuItemId::new(id))
    }

    async fn get_by_id(&self, id: MenuItemId) -> Result<Option<MenuItem>> {
        Ok(self.items.read().await.get(id.as_i64()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<(MenuItem, MenuItemId)>> {
        let items = self.items.read().await;
        Ok(items
            .matching(|item| item.name == name)
            .map(|(id, item)| (item.clone(), MenuItemId::new(id)))
            .collect())
    }

    async fn update(&self, id: MenuItemId, item: &MenuItem) -> Result<bool> {
        Ok(self.items.write().await.replace(id.as_i64(), item.clone()))
    }

    async fn delete(&self, id: MenuItemId) -> Result<bool> {
        Ok(self.items.write().await.remove(id.as_i64()))
    }

    async fn list_all(&self) -> Result<Vec<(MenuItem, MenuItemId)>> {
        let items = self.items.read().await;
        Ok(items
            .matching(|_| true)
            .map(|(id, item)| (item.clone(), MenuItemId::new(id)))
            .collect())
    }
}

/// In-memory inventory store implementation for testing.
#[derive(Clone, Default)]
pub struct InMemoryInventoryStore {
    records: Arc<RwLock<Table<InventoryRecord>>>,
}

impl InMemoryInventoryStore {
    /// Creates a new empty in-memory inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of records stored.
    pub async fn len(&self) -> usize {
        self.records.read().await.rows.len()
    }

    /// Returns true if no records are stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.rows.is_empty()
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn create(&self, record: &InventoryRecord) -> Result<InventoryId> {
        let id = self.records.write().await.insert(record.clone());
        Ok(InventoryId::new(id))
    }

    async fn get_by_id(&self, id: InventoryId) -> Result<Option<InventoryRecord>> {
        Ok(self.records.read().await.get(id.as_i64()))
    }

    async fn get_by_name(&self, item_name: &str) -> Result<Option<(InventoryRecord, InventoryId)>> {
        let records = self.records.read().await;
        Ok(records
            .matching(|r| r.item_name == item_name)
            .next()
            .map(|(id, r)| (r.clone(), InventoryId::new(id))))
    }

    async fn update(&self, id: InventoryId, record: &InventoryRecord) -> Result<bool> {
        Ok(self
            .records
            .write()
            .await
            .replace(id.as_i64(), record.clone()))
    }

    async fn delete(&self, id: InventoryId) -> Result<bool> {
        Ok(self.records.write().await.remove(id.as_i64()))
    }

    async fn list_all(&self) -> Result<Vec<(InventoryRecord, InventoryId)>> {
        let records = self.records.read().await;
        Ok(records
            .matching(|_| true)
            .map(|(id, r)| (r.clone(), InventoryId::new(id)))
            .collect())
    }
}
