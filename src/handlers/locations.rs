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
use crate::entities::location::{LocationPatch, NewLocation};
use crate::entities::location_transfer::NewLocationTransfer;
use crate::errors::ServiceError;
use crate::events::Event;
use crate::metrics::record_mutation;
use crate::AppState;

async fn list_locations(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    Ok(Json(state.storage.locations().await?))
}

async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let location = state.storage.location(id).await?;
    Ok(Json(found(location, "location", id)?))
}

async fn create_location(
    State(state): State<AppState>,
    Json(new): Json<NewLocation>,
) -> Result<impl IntoResponse, ServiceError> {
    new.validate()?;
    let location = state.storage.create_location(new).await?;
    state
        .event_sender
        .send(Event::LocationCreated(location.id))
        .await;
    record_mutation("locations", "create");
    Ok((StatusCode::CREATED, Json(location)))
}

async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<LocationPatch>,
) -> Result<impl IntoResponse, ServiceError> {
    let location = state.storage.update_location(id, patch).await?;
    let location = found(location, "location", id)?;
    state.event_sender.send(Event::LocationUpdated(id)).await;
    record_mutation("locations", "update");
    Ok(Json(location))
}

async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    deleted(state.storage.delete_location(id).await?, "location", id)?;
    state.event_sender.send(Event::LocationDeleted(id)).await;
    record_mutation("locations", "delete");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct TransferListParams {
    pub inventory_item_id: Option<i32>,
}

async fn list_transfers(
    State(state): State<AppState>,
    Query(params): Query<TransferListParams>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(Json(
        state
            .storage
            .location_transfers(params.inventory_item_id)
            .await?,
    ))
}

async fn create_transfer(
    State(state): State<AppState>,
    Json(new): Json<NewLocationTransfer>,
) -> Result<impl IntoResponse, ServiceError> {
    new.validate()?;
    let transfer = state.storage.create_location_transfer(new).await?;
    state
        .event_sender
        .send(Event::LocationTransferRecorded(transfer.id))
        .await;
    record_mutation("location_transfers", "create");
    Ok((StatusCode::CREATED, Json(transfer)))
}

pub fn location_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_locations).post(create_location))
        .route(
            "/:id",
            get(get_location).put(update_location).delete(delete_location),
        )
}

pub fn location_transfer_routes() -> Router<AppState> {
    Router::new().route("/", get(list_transfers).post(create_transfer))
}
