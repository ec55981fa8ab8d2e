//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use store::{CatalogStore, InventoryStore};

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub open_orders: usize,
}

/// GET /health: liveness plus the number of orders in progress.
pub async fn check<C: CatalogStore + 'static, I: InventoryStore + 'static>(
    State(state): State<Arc<AppState<C, I>>>,
) -> Json<HealthResponse> {
    let open_orders = state.orders.read().await.len();
    Json(HealthResponse {
        status: "ok",
        open_orders,
    })
}
