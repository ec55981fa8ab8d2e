//! Menu catalog service.

use std::sync::Arc;

use store::{CatalogStore, CatalogStoreExt, CategorySet, GroupedMenu, MenuItem, MenuItemId};

use crate::error::DomainError;
use crate::forms::MenuItemForm;
use crate::order::Order;

/// Service for editing and browsing the menu catalog.
///
/// Validates form input before any write and resolves items by name the way
/// the menu editor does.
pub struct MenuService<C: CatalogStore> {
    store: C,
    categories: CategorySet,
}

impl<C: CatalogStore> MenuService<C> {
    /// Creates a menu service grouping by the standard sections.
    pub fn new(store: C) -> Self {
        Self::with_categories(store, CategorySet::default())
    }

    /// Creates a menu service grouping by custom sections.
    pub fn with_categories(store: C, categories: CategorySet) -> Self {
        Self { store, categories }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &C {
        &self.store
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    /// Adds a new item from a submitted form.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, form: &MenuItemForm) -> Result<MenuItemId, DomainError> {
        let item = form.validate()?;
        let id = self.store.create(&item).await?;

        metrics::counter!("menu_items_created_total").increment(1);
        tracing::info!(%id, name = %item.name, "menu item created");
        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: MenuItemId) -> Result<Option<MenuItem>, DomainError> {
        Ok(self.store.get_by_id(id).await?)
    }

    /// Looks up an item by exact name.
    ///
    /// Names are not unique; when several items share one, the oldest wins
    /// and the ambiguity is logged.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_name(
        &self,
        name: &str,
    ) -> Result<Option<(MenuItem, MenuItemId)>, DomainError> {
        let matches = self.store.find_by_name(name).await?;
        if matches.len() > 1 {
            let ids: Vec<i64> = matches.iter().map(|(_, id)| id.as_i64()).collect();
            tracing::warn!(name, ?ids, "several menu items share this name; using the first");
        }
        Ok(matches.into_iter().next())
    }

    /// Overwrites an item from a submitted form.
    ///
    /// Returns false if no item has this id.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: MenuItemId, form: &MenuItemForm) -> Result<bool, DomainError> {
        let item = form.validate()?;
        let updated = self.store.update(id, &item).await?;

        if updated {
            metrics::counter!("menu_items_updated_total").increment(1);
            tracing::info!(%id, "menu item updated");
        }
        Ok(updated)
    }

    /// Overwrites the item currently named `name`.
    #[tracing::instrument(skip(self))]
    pub async fn update_by_name(
        &self,
        name: &str,
        form: &MenuItemForm,
    ) -> Result<MenuItemId, DomainError> {
        let item = form.validate()?;
        let (_, id) = self
            .get_by_name(name)
            .await?
            .ok_or_else(|| DomainError::menu_item_not_found(name))?;

        self.store.update(id, &item).await?;
        metrics::counter!("menu_items_updated_total").increment(1);
        tracing::info!(%id, "menu item updated");
        Ok(id)
    }

    /// Removes an item. Returns false if no item has this id.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: MenuItemId) -> Result<bool, DomainError> {
        let deleted = self.store.delete(id).await?;
        if deleted {
            metrics::counter!("menu_items_deleted_total").increment(1);
            tracing::info!(%id, "menu item deleted");
        }
        Ok(deleted)
    }

    /// Removes the item currently named `name`.
    #[tracing::instrument(skip(self))]
    pub async fn delete_by_name(&self, name: &str) -> Result<MenuItemId, DomainError> {
        let (_, id) = self
            .get_by_name(name)
            .await?
            .ok_or_else(|| DomainError::menu_item_not_found(name))?;

        self.delete(id).await?;
        Ok(id)
    }

    pub async fn list(&self) -> Result<Vec<(MenuItem, MenuItemId)>, DomainError> {
        Ok(self.store.list_all().await?)
    }

    /// Groups the catalog by this service's sections.
    pub async fn grouped(&self) -> Result<GroupedMenu, DomainError> {
        Ok(self.store.list_grouped_by(&self.categories).await?)
    }

    /// Renders the grouped menu as display text.
    pub async fn menu_text(&self) -> Result<String, DomainError> {
        Ok(render_menu(&self.grouped().await?))
    }

    /// Loads an item by id, ready to be added to an order.
    pub async fn order_item(&self, id: MenuItemId) -> Result<MenuItem, DomainError> {
        self.get(id)
            .await?
            .ok_or_else(|| DomainError::menu_item_not_found(id))
    }

    /// Loads an item by name, ready to be added to an order.
    pub async fn order_item_by_name(&self, name: &str) -> Result<MenuItem, DomainError> {
        let (item, _) = self
            .get_by_name(name)
            .await?
            .ok_or_else(|| DomainError::menu_item_not_found(name))?;
        Ok(item)
    }

    /// Loads an item by id and adds it to `order`.
    #[tracing::instrument(skip(self, order), fields(order_id = %order.id()))]
    pub async fn add_to_order(
        &self,
        order: &mut Order,
        id: MenuItemId,
    ) -> Result<Arc<MenuItem>, DomainError> {
        let item = self.order_item(id).await?;
        Ok(Self::add_loaded(order, item))
    }

    /// Loads an item by name and adds it to `order`.
    #[tracing::instrument(skip(self, order), fields(order_id = %order.id()))]
    pub async fn add_to_order_by_name(
        &self,
        order: &mut Order,
        name: &str,
    ) -> Result<Arc<MenuItem>, DomainError> {
        let item = self.order_item_by_name(name).await?;
        Ok(Self::add_loaded(order, item))
    }

    /// Adds an already loaded item to `order`.
    pub fn add_loaded(order: &mut Order, item: MenuItem) -> Arc<MenuItem> {
        let item = Arc::new(item);
        order.add(item.clone());
        metrics::counter!("order_items_added_total").increment(1);
        item
    }

    /// Pre-fills an edit form from the stored item.
    #[tracing::instrument(skip(self))]
    pub async fn edit_form(&self, id: MenuItemId) -> Result<Option<MenuItemForm>, DomainError> {
        Ok(self.get(id).await?.as_ref().map(MenuItemForm::from))
    }
}

/// Renders a grouped menu, one section per block:
///
/// ```text
/// Entrees:
///   Burger: A juicy beef burger $10.99 (500 calories)
///
/// Sides:
/// ```
pub fn render_menu(menu: &GroupedMenu) -> String {
    let mut text = String::new();
    for (category, items) in menu.iter() {
        text.push_str(category);
        text.push_str(":\n");
        for item in items {
            text.push_str("  ");
            text.push_str(&item.to_string());
            text.push('\n');
        }
        text.push('\n');
    }
    text
}
