//! Menu catalog endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::MenuItemForm;
use serde::Serialize;
use store::{CatalogStore, GroupedMenu, InventoryStore, MenuItem, MenuItemId};

use crate::AppState;
use crate::error::ApiError;

// -- Response types --

#[derive(Serialize)]
pub struct MenuItemResponse {
    pub id: MenuItemId,
    #[serde(flatten)]
    pub item: MenuItem,
}

impl From<(MenuItem, MenuItemId)> for MenuItemResponse {
    fn from((item, id): (MenuItem, MenuItemId)) -> Self {
        Self { id, item }
    }
}

#[derive(Serialize)]
pub struct MenuItemCreatedResponse {
    pub id: MenuItemId,
}

// -- Handlers --

/// GET /menu: catalog grouped by section.
#[tracing::instrument(skip(state))]
pub async fn grouped<C: CatalogStore + 'static, I: InventoryStore + 'static>(
    State(state): State<Arc<AppState<C, I>>>,
) -> Result<Json<GroupedMenu>, ApiError> {
    Ok(Json(state.menu.grouped().await?))
}

/// GET /menu/text: catalog rendered as display text.
#[tracing::instrument(skip(state))]
pub async fn text<C: CatalogStore + 'static, I: InventoryStore + 'static>(
    State(state): State<Arc<AppState<C, I>>>,
) -> Result<String, ApiError> {
    Ok(state.menu.menu_text().await?)
}

/// GET /menu/items: every item in id order.
#[tracing::instrument(skip(state))]
pub async fn list<C: CatalogStore + 'static, I: InventoryStore + 'static>(
    State(state): State<Arc<AppState<C, I>>>,
) -> Result<Json<Vec<MenuItemResponse>>, ApiError> {
    let items = state.menu.list().await?;
    Ok(Json(items.into_iter().map(MenuItemResponse::from).collect()))
}

/// POST /menu/items: create an item from form fields.
#[tracing::instrument(skip(state, form))]
pub async fn create<C: CatalogStore + 'static, I: InventoryStore + 'static>(
    State(state): State<Arc<AppState<C, I>>>,
    Json(form): Json<MenuItemForm>,
) -> Result<(StatusCode, Json<MenuItemCreatedResponse>), ApiError> {
    let id = state.menu.create(&form).await?;
    Ok((StatusCode::CREATED, Json(MenuItemCreatedResponse { id })))
}

/// GET /menu/items/{id}
#[tracing::instrument(skip(state))]
pub async fn get<C: CatalogStore + 'static, I: InventoryStore + 'static>(
    State(state): State<Arc<AppState<C, I>>>,
    Path(id): Path<i64>,
) -> Result<Json<MenuItemResponse>, ApiError> {
    let id = MenuItemId::new(id);
    let item = state
        .menu
        .get(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(MenuItemResponse { id, item }))
}

/// GET /menu/items/{id}/form: the item as pre-filled edit form fields.
#[tracing::instrument(skip(state))]
pub async fn edit_form<C: CatalogStore + 'static, I: InventoryStore + 'static>(
    State(state): State<Arc<AppState<C, I>>>,
    Path(id): Path<i64>,
) -> Result<Json<MenuItemForm>, ApiError> {
    let id = MenuItemId::new(id);
    let form = state
        .menu
        .edit_form(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(form))
}

/// GET /menu/items/by-name/{name}: first item with this exact name.
#[tracing::instrument(skip(state))]
pub async fn by_name<C: CatalogStore + 'static, I: InventoryStore + 'static>(
    State(state): State<Arc<AppState<C, I>>>,
    Path(name): Path<String>,
) -> Result<Json<MenuItemResponse>, ApiError> {
    let found = state
        .menu
        .get_by_name(&name)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Menu item {name:?} not found")))?;

    Ok(Json(found.into()))
}

/// PUT /menu/items/{id}: overwrite every field from form input.
#[tracing::instrument(skip(state, form))]
pub async fn update<C: CatalogStore + 'static, I: InventoryStore + 'static>(
    State(state): State<Arc<AppState<C, I>>>,
    Path(id): Path<i64>,
    Json(form): Json<MenuItemForm>,
) -> Result<Json<MenuItemResponse>, ApiError> {
    let id = MenuItemId::new(id);
    if !state.menu.update(id, &form).await? {
        return Err(not_found(id));
    }

    let item = state
        .menu
        .get(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(MenuItemResponse { id, item }))
}

/// DELETE /menu/items/{id}
#[tracing::instrument(skip(state))]
pub async fn delete<C: CatalogStore + 'static, I: InventoryStore + 'static>(
    State(state): State<Arc<AppState<C, I>>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let id = MenuItemId::new(id);
    if state.menu.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

fn not_found(id: MenuItemId) -> ApiError {
    ApiError::NotFound(format!("Menu item {id} not found"))
}
