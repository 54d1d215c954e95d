use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use validator::Validate;

use super::common::{deleted, found};
use crate::entities::invoice::{InvoicePatch, NewInvoice};
use crate::errors::ServiceError;
use crate::events::Event;
use crate::metrics::record_mutation;
use crate::AppState;

async fn list_invoices(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    Ok(Json(state.storage.invoices().await?))
}

async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let invoice = state.storage.invoice(id).await?;
    Ok(Json(found(invoice, "invoice", id)?))
}

async fn create_invoice(
    State(state): State<AppState>,
    Json(new): Json<NewInvoice>,
) -> Result<impl IntoResponse, ServiceError> {
    new.validate()?;
    let invoice = state.storage.create_invoice(new).await?;
    state
        .event_sender
        .send(Event::InvoiceCreated(invoice.id))
        .await;
    record_mutation("invoices", "create");
    Ok((StatusCode::CREATED, Json(invoice)))
}

async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<InvoicePatch>,
) -> Result<impl IntoResponse, ServiceError> {
    let invoice = state.storage.update_invoice(id, patch).await?;
    let invoice = found(invoice, "invoice", id)?;
    state.event_sender.send(Event::InvoiceUpdated(id)).await;
    record_mutation("invoices", "update");
    Ok(Json(invoice))
}

async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    deleted(state.storage.delete_invoice(id).await?, "invoice", id)?;
    state.event_sender.send(Event::InvoiceDeleted(id)).await;
    record_mutation("invoices", "delete");
    Ok(StatusCode::NO_CONTENT)
}

pub fn invoice_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_invoices).post(create_invoice))
        .route(
            "/:id",
            get(get_invoice).put(update_invoice).delete(delete_invoice),
        )
}
