use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use validator::Validate;

use super::common::{deleted, found};
use crate::entities::company::{CompanyPatch, NewCompany};
use crate::errors::ServiceError;
use crate::events::Event;
use crate::metrics::record_mutation;
use crate::AppState;

async fn list_companies(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    Ok(Json(state.storage.companies().await?))
}

async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let company = state.storage.company(id).await?;
    Ok(Json(found(company, "company", id)?))
}

async fn create_company(
    State(state): State<AppState>,
    Json(new): Json<NewCompany>,
) -> Result<impl IntoResponse, ServiceError> {
    new.validate()?;
    let company = state.storage.create_company(new).await?;
    state
        .event_sender
        .send(Event::CompanyCreated(company.id))
        .await;
    record_mutation("companies", "create");
    Ok((StatusCode::CREATED, Json(company)))
}

async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<CompanyPatch>,
) -> Result<impl IntoResponse, ServiceError> {
    let company = state.storage.update_company(id, patch).await?;
    let company = found(company, "company", id)?;
    state.event_sender.send(Event::CompanyUpdated(id)).await;
    record_mutation("companies", "update");
    Ok(Json(company))
}

async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    deleted(state.storage.delete_company(id).await?, "company", id)?;
    state.event_sender.send(Event::CompanyDeleted(id)).await;
    record_mutation("companies", "delete");
    Ok(StatusCode::NO_CONTENT)
}

pub fn company_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_companies).post(create_company))
        .route(
            "/:id",
            get(get_company).put(update_company).delete(delete_company),
        )
}
