use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use validator::Validate;

use super::common::{deleted, found};
use crate::entities::quotation::{NewQuotation, QuotationPatch};
use crate::errors::ServiceError;
use crate::events::Event;
use crate::metrics::record_mutation;
use crate::AppState;

async fn list_quotations(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(Json(state.storage.quotations().await?))
}

async fn get_quotation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let quotation = state.storage.quotation(id).await?;
    Ok(Json(found(quotation, "quotation", id)?))
}

/// Create a quotation. The vehicle details in the payload become an
/// immutable snapshot; later edits to the inventory record do not touch
/// issued documents.
async fn create_quotation(
    State(state): State<AppState>,
    Json(new): Json<NewQuotation>,
) -> Result<impl IntoResponse, ServiceError> {
    new.validate()?;
    let quotation = state.storage.create_quotation(new).await?;
    state
        .event_sender
        .send(Event::QuotationCreated(quotation.id))
        .await;
    record_mutation("quotations", "create");
    Ok((StatusCode::CREATED, Json(quotation)))
}

async fn update_quotation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<QuotationPatch>,
) -> Result<impl IntoResponse, ServiceError> {
    let quotation = state.storage.update_quotation(id, patch).await?;
    let quotation = found(quotation, "quotation", id)?;
    state.event_sender.send(Event::QuotationUpdated(id)).await;
    record_mutation("quotations", "update");
    Ok(Json(quotation))
}

async fn delete_quotation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    deleted(state.storage.delete_quotation(id).await?, "quotation", id)?;
    state.event_sender.send(Event::QuotationDeleted(id)).await;
    record_mutation("quotations", "delete");
    Ok(StatusCode::NO_CONTENT)
}

pub fn quotation_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_quotations).post(create_quotation))
        .route(
            "/:id",
            get(get_quotation)
                .put(update_quotation)
                .delete(delete_quotation),
        )
}
