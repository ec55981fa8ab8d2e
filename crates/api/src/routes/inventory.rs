//! Inventory endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::InventoryForm;
use serde::Serialize;
use store::{CatalogStore, InventoryId, InventoryRecord, InventoryStore};

use crate::AppState;
use crate::error::ApiError;

#[derive(Serialize)]
pub struct InventoryResponse {
    pub id: InventoryId,
    #[serde(flatten)]
    pub record: InventoryRecord,
}

impl From<(InventoryRecord, InventoryId)> for InventoryResponse {
    fn from((record, id): (InventoryRecord, InventoryId)) -> Self {
        Self { id, record }
    }
}

#[derive(Serialize)]
pub struct InventoryCreatedResponse {
    pub id: InventoryId,
}

/// GET /inventory
#[tracing::instrument(skip(state))]
pub async fn list<C: CatalogStore + 'static, I: InventoryStore + 'static>(
    State(state): State<Arc<AppState<C, I>>>,
) -> Result<Json<Vec<InventoryResponse>>, ApiError> {
    let records = state.inventory.list().await?;
    Ok(Json(records.into_iter().map(InventoryResponse::from).collect()))
}

/// POST /inventory: create a record from form fields.
#[tracing::instrument(skip(state, form))]
pub async fn create<C: CatalogStore + 'static, I: InventoryStore + 'static>(
    State(state): State<Arc<AppState<C, I>>>,
    Json(form): Json<InventoryForm>,
) -> Result<(StatusCode, Json<InventoryCreatedResponse>), ApiError> {
    let id = state.inventory.create(&form).await?;
    Ok((StatusCode::CREATED, Json(InventoryCreatedResponse { id })))
}

/// GET /inventory/{id}
#[tracing::instrument(skip(state))]
pub async fn get<C: CatalogStore + 'static, I: InventoryStore + 'static>(
    State(state): State<Arc<AppState<C, I>>>,
    Path(id): Path<i64>,
) -> Result<Json<InventoryResponse>, ApiError> {
    let id = InventoryId::new(id);
    let record = state
        .inventory
        .get(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(InventoryResponse { id, record }))
}

/// GET /inventory/by-name/{name}
#[tracing::instrument(skip(state))]
pub async fn by_name<C: CatalogStore + 'static, I: InventoryStore + 'static>(
    State(state): State<Arc<AppState<C, I>>>,
    Path(name): Path<String>,
) -> Result<Json<InventoryResponse>, ApiError> {
    let found = state
        .inventory
        .get_by_name(&name)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Inventory item {name:?} not found")))?;

    Ok(Json(found.into()))
}

/// PUT /inventory/{id}
#[tracing::instrument(skip(state, form))]
pub async fn update<C: CatalogStore + 'static, I: InventoryStore + 'static>(
    State(state): State<Arc<AppState<C, I>>>,
    Path(id): Path<i64>,
    Json(form): Json<InventoryForm>,
) -> Result<Json<InventoryResponse>, ApiError> {
    let id = InventoryId::new(id);
    if !state.inventory.update(id, &form).await? {
        return Err(not_found(id));
    }

    let record = state
        .inventory
        .get(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(InventoryResponse { id, record }))
}

/// DELETE /inventory/{id}
#[tracing::instrument(skip(state))]
pub async fn delete<C: CatalogStore + 'static, I: InventoryStore + 'static>(
    State(state): State<Arc<AppState<C, I>>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let id = InventoryId::new(id);
    if state.inventory.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

fn not_found(id: InventoryId) -> ApiError {
    ApiError::NotFound(format!("Inventory record {id} not found"))
}
