use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use validator::Validate;

use super::common::{deleted, found};
use crate::entities::financing_rate::{FinancingRatePatch, NewFinancingRate};
use crate::errors::ServiceError;
use crate::events::Event;
use crate::metrics::record_mutation;
use crate::AppState;

async fn list_rates(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    Ok(Json(state.storage.financing_rates().await?))
}

async fn get_rate(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let rate = state.storage.financing_rate(id).await?;
    Ok(Json(found(rate, "financing rate", id)?))
}

async fn create_rate(
    State(state): State<AppState>,
    Json(new): Json<NewFinancingRate>,
) -> Result<impl IntoResponse, ServiceError> {
    new.validate()?;
    let rate = state.storage.create_financing_rate(new).await?;
    state
        .event_sender
        .send(Event::FinancingRateCreated(rate.id))
        .await;
    record_mutation("financing_rates", "create");
    Ok((StatusCode::CREATED, Json(rate)))
}

async fn update_rate(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<FinancingRatePatch>,
) -> Result<impl IntoResponse, ServiceError> {
    let rate = state.storage.update_financing_rate(id, patch).await?;
    let rate = found(rate, "financing rate", id)?;
    state.event_sender.send(Event::FinancingRateUpdated(id)).await;
    record_mutation("financing_rates", "update");
    Ok(Json(rate))
}

async fn delete_rate(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    deleted(
        state.storage.delete_financing_rate(id).await?,
        "financing rate",
        id,
    )?;
    state.event_sender.send(Event::FinancingRateDeleted(id)).await;
    record_mutation("financing_rates", "delete");
    Ok(StatusCode::NO_CONTENT)
}

pub fn financing_rate_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rates).post(create_rate))
        .route("/:id", get(get_rate).put(update_rate).delete(delete_rate))
}
