use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;
use validator::Validate;

use super::common::{deleted, found};
use crate::entities::inventory_item::{InventoryItemPatch, NewInventoryItem};
use crate::entities::VehicleStatus;
use crate::errors::ServiceError;
use crate::events::Event;
use crate::metrics::record_mutation;
use crate::storage::InventoryFilter;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

/// List the full inventory snapshot, optionally narrowed by the equality
/// filters the storage façade supports.
async fn list_inventory(
    State(state): State<AppState>,
    Query(filter): Query<InventoryFilter>,
) -> Result<impl IntoResponse, ServiceError> {
    let items = if filter.is_empty() {
        state.storage.inventory_items().await?
    } else {
        state.storage.filter_inventory_items(&filter).await?
    };
    Ok(Json(items))
}

async fn search_inventory(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let items = state.storage.search_inventory_items(&params.q).await?;
    Ok(Json(items))
}

async fn sold_inventory(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(Json(state.storage.sold_inventory_items().await?))
}

async fn inventory_stats(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(Json(state.storage.inventory_stats().await?))
}

async fn manufacturer_stats(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(Json(state.storage.inventory_manufacturer_stats().await?))
}

async fn location_stats(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(Json(state.storage.inventory_location_stats().await?))
}

async fn get_inventory_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.storage.inventory_item(id).await?;
    Ok(Json(found(item, "inventory item", id)?))
}

async fn create_inventory_item(
    State(state): State<AppState>,
    Json(new): Json<NewInventoryItem>,
) -> Result<impl IntoResponse, ServiceError> {
    new.validate()?;
    let item = state.storage.create_inventory_item(new).await?;
    state
        .event_sender
        .send(Event::InventoryItemCreated(item.id))
        .await;
    record_mutation("inventory_items", "create");
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_inventory_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<InventoryItemPatch>,
) -> Result<impl IntoResponse, ServiceError> {
    let now_sold =
        patch.is_sold == Some(true) || patch.status == Some(VehicleStatus::Sold);
    let item = state.storage.update_inventory_item(id, patch).await?;
    let item = found(item, "inventory item", id)?;
    let event = if now_sold {
        Event::InventoryItemSold(id)
    } else {
        Event::InventoryItemUpdated(id)
    };
    state.event_sender.send(event).await;
    record_mutation("inventory_items", "update");
    Ok(Json(item))
}

async fn delete_inventory_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    deleted(
        state.storage.delete_inventory_item(id).await?,
        "inventory item",
        id,
    )?;
    state
        .event_sender
        .send(Event::InventoryItemDeleted(id))
        .await;
    record_mutation("inventory_items", "delete");
    Ok(StatusCode::NO_CONTENT)
}

pub fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_inventory).post(create_inventory_item))
        .route("/search", get(search_inventory))
        .route("/sold", get(sold_inventory))
        .route("/stats", get(inventory_stats))
        .route("/manufacturer-stats", get(manufacturer_stats))
        .route("/location-stats", get(location_stats))
        .route(
            "/:id",
            get(get_inventory_item)
                .put(update_inventory_item)
                .delete(delete_inventory_item),
        )
}
