//! Integration tests for the API server.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use api::AppState;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{Value, json};
use async_trait::async_trait;
use store::{
    CatalogStore, CategorySet, InMemoryCatalogStore, InMemoryInventoryStore, MenuItem, MenuItemId,
};
use tokio::sync::Notify;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            metrics_exporter_prometheus::PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> axum::Router {
    let state = Arc::new(AppState::new(
        InMemoryCatalogStore::new(),
        InMemoryInventoryStore::new(),
        CategorySet::default(),
    ));
    api::create_app(state, get_metrics_handle())
}

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn send_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn burger_form() -> Value {
    json!({
        "name": "Burger",
        "description": "A juicy beef burger",
        "price": "10.99",
        "calories": "500",
        "category": "Entrees"
    })
}

fn assert_close(actual: &Value, expected: f64) {
    let actual = actual.as_f64().unwrap();
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[tokio::test]
async fn test_health_check() {
    let app = setup();
    let (status, json) = send_json(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["open_orders"], 0);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = setup();
    let (status, _) = send(&app, "GET", "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_and_fetch_menu_item() {
    let app = setup();

    let (status, created) = send_json(&app, "POST", "/menu/items", Some(burger_form())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);

    let (status, item) = send_json(&app, "GET", "/menu/items/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["id"], 1);
    assert_eq!(item["name"], "Burger");
    assert_eq!(item["calories"], 500);
    assert_close(&item["price"], 10.99);

    let (status, item) = send_json(&app, "GET", "/menu/items/by-name/Burger", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["id"], 1);
}

#[tokio::test]
async fn test_invalid_form_is_rejected() {
    let app = setup();
    let mut form = burger_form();
    form["price"] = json!("ten dollars");

    let (status, json) = send_json(&app, "POST", "/menu/items", Some(form)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("price"));

    let (_, list) = send_json(&app, "GET", "/menu/items", None).await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_update_and_delete_menu_item() {
    let app = setup();
    send_json(&app, "POST", "/menu/items", Some(burger_form())).await;

    let (status, updated) = send_json(
        &app,
        "PUT",
        "/menu/items/1",
        Some(json!({
            "name": "Milkshake",
            "description": "Chocolate",
            "price": "5.25",
            "calories": "700",
            "category": "Desserts"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Milkshake");
    assert_eq!(updated["category"], "Desserts");

    let (status, _) = send(&app, "DELETE", "/menu/items/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/menu/items/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "PUT", "/menu/items/1", Some(burger_form())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_grouped_menu_and_text() {
    let app = setup();
    send_json(&app, "POST", "/menu/items", Some(burger_form())).await;
    let mut soup = burger_form();
    soup["name"] = json!("Soup");
    soup["category"] = json!("Soups");
    send_json(&app, "POST", "/menu/items", Some(soup)).await;

    let (status, grouped) = send_json(&app, "GET", "/menu", None).await;
    assert_eq!(status, StatusCode::OK);
    let groups = grouped["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 4);
    assert_eq!(groups[0]["category"], "Entrees");
    assert_eq!(groups[0]["items"][0]["name"], "Burger");
    assert_eq!(grouped["unclassified"][0]["name"], "Soup");

    let (status, text) = send(&app, "GET", "/menu/text", None).await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(text).unwrap();
    assert!(text.starts_with("Entrees:\n  Burger: A juicy beef burger $10.99 (500 calories)\n"));
    assert!(!text.contains("Soup"));
}

#[tokio::test]
async fn test_inventory_crud() {
    let app = setup();

    let (status, created) = send_json(
        &app,
        "POST",
        "/inventory",
        Some(json!({ "item_name": "Buns", "quantity": "40", "category": "Bakery" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, record) = send_json(
        &app,
        "PUT",
        &format!("/inventory/{id}"),
        Some(json!({ "item_name": "Buns", "quantity": "35" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["quantity"], 35);
    assert_eq!(record["category"], "");

    let (status, record) = send_json(&app, "GET", "/inventory/by-name/Buns", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["id"], id);

    let (status, _) = send(&app, "DELETE", &format!("/inventory/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &format!("/inventory/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_inventory_rejects_non_numeric_quantity() {
    let app = setup();
    let (status, _) = send_json(
        &app,
        "POST",
        "/inventory",
        Some(json!({ "item_name": "Buns", "quantity": "plenty" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_order_totals_flow() {
    let app = setup();
    send_json(&app, "POST", "/menu/items", Some(burger_form())).await;

    let (status, order) = send_json(&app, "POST", "/orders", None).await;
    assert_eq!(status, StatusCode::CREATED);
    let order_id = order["id"].as_str().unwrap().to_string();
    assert_eq!(order["subtotal"], 0.0);
    assert_eq!(order["total"], 0.0);

    let uri = format!("/orders/{order_id}/items");
    send_json(&app, "POST", &uri, Some(json!({ "menu_item_id": 1 }))).await;
    let (status, order) = send_json(&app, "POST", &uri, Some(json!({ "name": "Burger" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["items"].as_array().unwrap().len(), 2);
    assert_close(&order["subtotal"], 21.98);
    assert_close(&order["tax"], 1.5386);
    assert_close(&order["total"], 23.5186);

    let (status, receipt) = send(&app, "GET", &format!("/orders/{order_id}/receipt"), None).await;
    assert_eq!(status, StatusCode::OK);
    let receipt = String::from_utf8(receipt).unwrap();
    assert!(receipt.ends_with("Subtotal: $21.98\nTax (7%): $1.54\nTotal: $23.52"));

    let (_, health) = send_json(&app, "GET", "/health", None).await;
    assert_eq!(health["open_orders"], 1);

    let (status, order) =
        send_json(&app, "POST", &format!("/orders/{order_id}/clear"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["items"].as_array().unwrap().len(), 0);
    assert_eq!(order["total"], 0.0);

    let (status, _) = send(&app, "DELETE", &format!("/orders/{order_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &format!("/orders/{order_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_order_add_unknown_item() {
    let app = setup();
    let (_, order) = send_json(&app, "POST", "/orders", None).await;
    let uri = format!("/orders/{}/items", order["id"].as_str().unwrap());

    let (status, _) = send_json(&app, "POST", &uri, Some(json!({ "name": "Ghost" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(&app, "POST", &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_order_invalid_id() {
    let app = setup();

    let (status, _) = send(&app, "GET", "/orders/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "GET",
        "/orders/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_form_is_prefilled_from_item() {
    let app = setup();
    send_json(&app, "POST", "/menu/items", Some(burger_form())).await;

    let (status, mut form) = send_json(&app, "GET", "/menu/items/1/form", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form, burger_form());

    form["price"] = json!("11.49");
    let (status, item) = send_json(&app, "PUT", "/menu/items/1", Some(form)).await;
    assert_eq!(status, StatusCode::OK);
    assert_close(&item["price"], 11.49);

    let (status, _) = send(&app, "GET", "/menu/items/9/form", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_open_order_limit_drops_oldest() {
    let state = AppState::new(
        InMemoryCatalogStore::new(),
        InMemoryInventoryStore::new(),
        CategorySet::default(),
    )
    .with_order_limit(2);
    let app = api::create_app(Arc::new(state), get_metrics_handle());

    let mut ids = Vec::new();
    for _ in 0..3 {
        let (_, order) = send_json(&app, "POST", "/orders", None).await;
        ids.push(order["id"].as_str().unwrap().to_string());
    }

    let (status, _) = send(&app, "GET", &format!("/orders/{}", ids[0]), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    for id in &ids[1..] {
        let (status, _) = send(&app, "GET", &format!("/orders/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, health) = send_json(&app, "GET", "/health", None).await;
    assert_eq!(health["open_orders"], 2);
}

/// Catalog whose id lookups wait until released.
struct GatedCatalog {
    inner: InMemoryCatalogStore,
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

#[async_trait]
impl CatalogStore for GatedCatalog {
    async fn create(&self, item: &MenuItem) -> store::Result<MenuItemId> {
        self.inner.create(item).await
    }

    async fn get_by_id(&self, id: MenuItemId) -> store::Result<Option<MenuItem>> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.get_by_id(id).await
    }

    async fn find_by_name(&self, name: &str) -> store::Result<Vec<(MenuItem, MenuItemId)>> {
        self.inner.find_by_name(name).await
    }

    async fn update(&self, id: MenuItemId, item: &MenuItem) -> store::Result<bool> {
        self.inner.update(id, item).await
    }

    async fn delete(&self, id: MenuItemId) -> store::Result<bool> {
        self.inner.delete(id).await
    }

    async fn list_all(&self) -> store::Result<Vec<(MenuItem, MenuItemId)>> {
        self.inner.list_all().await
    }
}

#[tokio::test]
async fn test_orders_stay_readable_during_catalog_lookup() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let catalog = GatedCatalog {
        inner: InMemoryCatalogStore::new(),
        entered: entered.clone(),
        release: release.clone(),
    };
    catalog
        .create(&MenuItem::new("Burger", "A juicy beef burger", 10.99, 500, "Entrees"))
        .await
        .unwrap();

    let state = AppState::new(catalog, InMemoryInventoryStore::new(), CategorySet::default());
    let app = api::create_app(Arc::new(state), get_metrics_handle());

    let (_, order) = send_json(&app, "POST", "/orders", None).await;
    let order_id = order["id"].as_str().unwrap().to_string();

    let pending = tokio::spawn({
        let app = app.clone();
        let uri = format!("/orders/{order_id}/items");
        async move { send_json(&app, "POST", &uri, Some(json!({ "menu_item_id": 1 }))).await }
    });
    entered.notified().await;

    let (status, health) = tokio::time::timeout(
        Duration::from_secs(5),
        send_json(&app, "GET", "/health", None),
    )
    .await
    .expect("health check waited on the catalog lookup");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["open_orders"], 1);

    let (status, order) = tokio::time::timeout(
        Duration::from_secs(5),
        send_json(&app, "GET", &format!("/orders/{order_id}"), None),
    )
    .await
    .expect("order read waited on the catalog lookup");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["items"].as_array().unwrap().len(), 0);

    release.notify_one();
    let (status, order) = pending.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["items"].as_array().unwrap().len(), 1);
    assert_close(&order["subtotal"], 10.99);
}
