//! HTTP front end for the menu manager.
//!
//! Provides REST endpoints for the menu catalog, inventory and open orders,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod sessions;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use domain::{InventoryService, MenuService};
use metrics_exporter_prometheus::PrometheusHandle;
use store::{CatalogStore, CategorySet, InventoryStore};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::sessions::OpenOrders;

/// Shared application state accessible from all handlers.
pub struct AppState<C: CatalogStore, I: InventoryStore> {
    pub menu: MenuService<C>,
    pub inventory: InventoryService<I>,
    /// Orders being assembled. Discarded, evicted at the open-order limit,
    /// or lost on shutdown.
    pub orders: RwLock<OpenOrders>,
}

impl<C: CatalogStore, I: InventoryStore> AppState<C, I> {
    pub fn new(catalog: C, inventory: I, categories: CategorySet) -> Self {
        Self {
            menu: MenuService::with_categories(catalog, categories),
            inventory: InventoryService::new(inventory),
            orders: RwLock::new(OpenOrders::default()),
        }
    }

    /// Caps how many orders may be open at once.
    pub fn with_order_limit(mut self, limit: usize) -> Self {
        self.orders = RwLock::new(OpenOrders::with_limit(limit));
        self
    }
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<C, I>(state: Arc<AppState<C, I>>, metrics_handle: PrometheusHandle) -> Router
where
    C: CatalogStore + 'static,
    I: InventoryStore + 'static,
{
    use routes::{inventory, menu, orders};

    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check::<C, I>))
        .route("/menu", get(menu::grouped::<C, I>))
        .route("/menu/text", get(menu::text::<C, I>))
        .route(
            "/menu/items",
            get(menu::list::<C, I>).post(menu::create::<C, I>),
        )
        .route(
            "/menu/items/{id}",
            get(menu::get::<C, I>)
                .put(menu::update::<C, I>)
                .delete(menu::delete::<C, I>),
        )
        .route("/menu/items/{id}/form", get(menu::edit_form::<C, I>))
        .route("/menu/items/by-name/{name}", get(menu::by_name::<C, I>))
        .route(
            "/inventory",
            get(inventory::list::<C, I>).post(inventory::create::<C, I>),
        )
        .route(
            "/inventory/{id}",
            get(inventory::get::<C, I>)
                .put(inventory::update::<C, I>)
                .delete(inventory::delete::<C, I>),
        )
        .route("/inventory/by-name/{name}", get(inventory::by_name::<C, I>))
        .route("/orders", post(orders::open::<C, I>))
        .route(
            "/orders/{id}",
            get(orders::get::<C, I>).delete(orders::discard::<C, I>),
        )
        .route("/orders/{id}/items", post(orders::add_item::<C, I>))
        .route("/orders/{id}/clear", post(orders::clear::<C, I>))
        .route("/orders/{id}/receipt", get(orders::receipt::<C, I>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
