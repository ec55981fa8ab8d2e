//! Order session endpoints.
//!
//! Orders live only in memory: opening one returns an id, items are added by
//! catalog id or name, and totals are recomputed on every read.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::OrderId;
use domain::{MenuService, Order, OrderTotals};
use serde::{Deserialize, Serialize};
use store::{CatalogStore, InventoryStore, MenuItem, MenuItemId};

use crate::AppState;
use crate::error::ApiError;

// -- Request types --

/// Selects a catalog item by id or, failing that, by name.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub menu_item_id: Option<i64>,
    pub name: Option<String>,
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub opened_at: String,
    pub items: Vec<MenuItem>,
    #[serde(flatten)]
    pub totals: OrderTotals,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            opened_at: order.opened_at().to_rfc3339(),
            items: order.items().cloned().collect(),
            totals: order.compute_totals(),
        }
    }
}

// -- Handlers --

/// POST /orders: open a new empty order.
#[tracing::instrument(skip(state))]
pub async fn open<C: CatalogStore + 'static, I: InventoryStore + 'static>(
    State(state): State<Arc<AppState<C, I>>>,
) -> (StatusCode, Json<OrderResponse>) {
    let order = Order::new();
    let response = OrderResponse::from(&order);

    tracing::info!(order_id = %order.id(), "order opened");
    metrics::counter!("orders_opened_total").increment(1);
    if let Some(evicted) = state.orders.write().await.open(order) {
        tracing::warn!(order_id = %evicted, "open order limit reached, dropped oldest order");
        metrics::counter!("orders_evicted_total").increment(1);
    }

    (StatusCode::CREATED, Json(response))
}

/// GET /orders/{id}: current contents and totals.
#[tracing::instrument(skip(state))]
pub async fn get<C: CatalogStore + 'static, I: InventoryStore + 'static>(
    State(state): State<Arc<AppState<C, I>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let orders = state.orders.read().await;
    let order = orders.get(&order_id).ok_or_else(|| not_found(&id))?;

    Ok(Json(order.into()))
}

/// POST /orders/{id}/items: add one catalog item.
#[tracing::instrument(skip(state))]
pub async fn add_item<C: CatalogStore + 'static, I: InventoryStore + 'static>(
    State(state): State<Arc<AppState<C, I>>>,
    Path(id): Path<String>,
    Json(req): Json<AddItemRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&id)?;
    if !state.orders.read().await.contains(&order_id) {
        return Err(not_found(&id));
    }

    // The catalog lookup runs without holding the orders lock.
    let item = match (req.menu_item_id, req.name.as_deref()) {
        (Some(item_id), _) => state.menu.order_item(MenuItemId::new(item_id)).await?,
        (None, Some(name)) => state.menu.order_item_by_name(name).await?,
        (None, None) => {
            return Err(ApiError::BadRequest(
                "Either menu_item_id or name is required".to_string(),
            ));
        }
    };

    let mut orders = state.orders.write().await;
    let order = orders.get_mut(&order_id).ok_or_else(|| not_found(&id))?;
    MenuService::<C>::add_loaded(order, item);

    Ok(Json(OrderResponse::from(&*order)))
}

/// POST /orders/{id}/clear: remove every item, keeping the order open.
#[tracing::instrument(skip(state))]
pub async fn clear<C: CatalogStore + 'static, I: InventoryStore + 'static>(
    State(state): State<Arc<AppState<C, I>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let mut orders = state.orders.write().await;
    let order = orders.get_mut(&order_id).ok_or_else(|| not_found(&id))?;

    order.clear();
    Ok(Json(OrderResponse::from(&*order)))
}

/// DELETE /orders/{id}: discard the order.
#[tracing::instrument(skip(state))]
pub async fn discard<C: CatalogStore + 'static, I: InventoryStore + 'static>(
    State(state): State<Arc<AppState<C, I>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let order_id = parse_order_id(&id)?;
    state
        .orders
        .write()
        .await
        .remove(&order_id)
        .ok_or_else(|| not_found(&id))?;

    tracing::info!(%order_id, "order discarded");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /orders/{id}/receipt: printable receipt text.
#[tracing::instrument(skip(state))]
pub async fn receipt<C: CatalogStore + 'static, I: InventoryStore + 'static>(
    State(state): State<Arc<AppState<C, I>>>,
    Path(id): Path<String>,
) -> Result<String, ApiError> {
    let order_id = parse_order_id(&id)?;
    let orders = state.orders.read().await;
    let order = orders.get(&order_id).ok_or_else(|| not_found(&id))?;

    Ok(order.to_string())
}

fn parse_order_id(id: &str) -> Result<OrderId, ApiError> {
    let uuid = uuid::Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))?;
    Ok(OrderId::from_uuid(uuid))
}

fn not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("Order {id} not found"))
}
