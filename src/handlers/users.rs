use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use validator::Validate;

use super::common::{deleted, found};
use crate::auth::hash_password;
use crate::entities::user::{NewUser, UserCredentials, UserPatch, UserRecordPatch};
use crate::errors::ServiceError;
use crate::events::Event;
use crate::metrics::record_mutation;
use crate::AppState;

async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    Ok(Json(state.storage.users().await?))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let user = state.storage.user(id).await?;
    Ok(Json(found(user, "user", id)?))
}

/// Create a user. The plaintext password is hashed here and only the hash
/// crosses the storage boundary.
async fn create_user(
    State(state): State<AppState>,
    Json(new): Json<NewUser>,
) -> Result<impl IntoResponse, ServiceError> {
    new.validate()?;
    if state.storage.user_by_username(&new.username).await?.is_some() {
        return Err(ServiceError::InvalidInput(format!(
            "username {:?} is already taken",
            new.username
        )));
    }
    let credentials = UserCredentials {
        username: new.username,
        password_hash: hash_password(&new.password)?,
        role: new.role,
    };
    let user = state.storage.create_user(credentials).await?;
    state.event_sender.send(Event::UserCreated(user.id)).await;
    record_mutation("users", "create");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<UserPatch>,
) -> Result<impl IntoResponse, ServiceError> {
    let record_patch = UserRecordPatch {
        username: patch.username,
        password_hash: match patch.password.as_deref() {
            Some(password) => Some(hash_password(password)?),
            None => None,
        },
        role: patch.role,
    };
    let user = state.storage.update_user(id, record_patch).await?;
    let user = found(user, "user", id)?;
    state.event_sender.send(Event::UserUpdated(id)).await;
    record_mutation("users", "update");
    Ok(Json(user))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    deleted(state.storage.delete_user(id).await?, "user", id)?;
    state.event_sender.send(Event::UserDeleted(id)).await;
    record_mutation("users", "delete");
    Ok(StatusCode::NO_CONTENT)
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}
