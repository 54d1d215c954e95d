use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use validator::Validate;

use super::common::{deleted, found};
use crate::entities::manufacturer::{ManufacturerPatch, NewManufacturer};
use crate::errors::ServiceError;
use crate::events::Event;
use crate::metrics::record_mutation;
use crate::AppState;

async fn list_manufacturers(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(Json(state.storage.manufacturers().await?))
}

async fn get_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let manufacturer = state.storage.manufacturer(id).await?;
    Ok(Json(found(manufacturer, "manufacturer", id)?))
}

async fn create_manufacturer(
    State(state): State<AppState>,
    Json(new): Json<NewManufacturer>,
) -> Result<impl IntoResponse, ServiceError> {
    new.validate()?;
    let manufacturer = state.storage.create_manufacturer(new).await?;
    state
        .event_sender
        .send(Event::ManufacturerCreated(manufacturer.id))
        .await;
    record_mutation("manufacturers", "create");
    Ok((StatusCode::CREATED, Json(manufacturer)))
}

async fn update_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<ManufacturerPatch>,
) -> Result<impl IntoResponse, ServiceError> {
    let manufacturer = state.storage.update_manufacturer(id, patch).await?;
    let manufacturer = found(manufacturer, "manufacturer", id)?;
    state.event_sender.send(Event::ManufacturerUpdated(id)).await;
    record_mutation("manufacturers", "update");
    Ok(Json(manufacturer))
}

/// Delete a manufacturer. Inventory items referencing it by name are left
/// untouched; there is deliberately no cascade.
async fn delete_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    deleted(
        state.storage.delete_manufacturer(id).await?,
        "manufacturer",
        id,
    )?;
    state.event_sender.send(Event::ManufacturerDeleted(id)).await;
    record_mutation("manufacturers", "delete");
    Ok(StatusCode::NO_CONTENT)
}

pub fn manufacturer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_manufacturers).post(create_manufacturer))
        .route(
            "/:id",
            get(get_manufacturer)
                .put(update_manufacturer)
                .delete(delete_manufacturer),
        )
}
