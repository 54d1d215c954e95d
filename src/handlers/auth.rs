use axum::{
    extract::{Json, State},
    response::IntoResponse,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::auth::{issue_token, verify_password};
use crate::entities::UserRole;
use crate::errors::ServiceError;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i32,
    pub username: String,
    pub role: UserRole,
}

/// Verify credentials against the stored argon2 hash and hand back a
/// signed token carrying the user's role. Unknown usernames and wrong
/// passwords are indistinguishable in the response.
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    request.validate()?;

    let user = state
        .storage
        .user_by_username(&request.username)
        .await?
        .ok_or_else(|| ServiceError::Unauthorized("invalid credentials".to_string()))?;

    if !verify_password(&request.password, &user.password_hash)? {
        return Err(ServiceError::Unauthorized("invalid credentials".to_string()));
    }

    let token = issue_token(&user, &state.config.jwt_secret, state.config.jwt_expiration)?;
    info!(user_id = user.id, "login succeeded");

    Ok(Json(LoginResponse {
        token,
        user_id: user.id,
        username: user.username,
        role: user.role,
    }))
}

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}
