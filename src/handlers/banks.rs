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
use crate::entities::bank::{BankPatch, NewBank};
use crate::entities::bank_interest_rate::NewBankInterestRate;
use crate::entities::BankType;
use crate::errors::ServiceError;
use crate::events::Event;
use crate::metrics::record_mutation;
use crate::AppState;

async fn list_banks(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    Ok(Json(state.storage.banks().await?))
}

async fn get_bank(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let bank = state.storage.bank(id).await?;
    Ok(Json(found(bank, "bank", id)?))
}

/// Banks filtered by account classification. The path segment carries the
/// Arabic wire value ("شخصي" or "شركة"); anything else is a 400.
async fn banks_by_type(
    State(state): State<AppState>,
    Path(bank_type): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let bank_type: BankType = serde_json::from_value(serde_json::Value::String(bank_type))
        .map_err(|_| ServiceError::InvalidInput("unknown bank type".to_string()))?;
    Ok(Json(state.storage.banks_by_type(bank_type).await?))
}

async fn create_bank(
    State(state): State<AppState>,
    Json(new): Json<NewBank>,
) -> Result<impl IntoResponse, ServiceError> {
    new.validate()?;
    let bank = state.storage.create_bank(new).await?;
    state.event_sender.send(Event::BankCreated(bank.id)).await;
    record_mutation("banks", "create");
    Ok((StatusCode::CREATED, Json(bank)))
}

async fn update_bank(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<BankPatch>,
) -> Result<impl IntoResponse, ServiceError> {
    let bank = state.storage.update_bank(id, patch).await?;
    let bank = found(bank, "bank", id)?;
    state.event_sender.send(Event::BankUpdated(id)).await;
    record_mutation("banks", "update");
    Ok(Json(bank))
}

async fn delete_bank(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    deleted(state.storage.delete_bank(id).await?, "bank", id)?;
    state.event_sender.send(Event::BankDeleted(id)).await;
    record_mutation("banks", "delete");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct InterestRateParams {
    pub bank_id: Option<i32>,
}

async fn list_interest_rates(
    State(state): State<AppState>,
    Query(params): Query<InterestRateParams>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(Json(
        state.storage.bank_interest_rates(params.bank_id).await?,
    ))
}

async fn create_interest_rate(
    State(state): State<AppState>,
    Json(new): Json<NewBankInterestRate>,
) -> Result<impl IntoResponse, ServiceError> {
    new.validate()?;
    let rate = state.storage.create_bank_interest_rate(new).await?;
    state
        .event_sender
        .send(Event::BankInterestRateCreated(rate.id))
        .await;
    record_mutation("bank_interest_rates", "create");
    Ok((StatusCode::CREATED, Json(rate)))
}

pub fn bank_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_banks).post(create_bank))
        .route("/type/:bank_type", get(banks_by_type))
        .route("/:id", get(get_bank).put(update_bank).delete(delete_bank))
}

pub fn bank_interest_rate_routes() -> Router<AppState> {
    Router::new().route("/", get(list_interest_rates).post(create_interest_rate))
}
