//! Authentication endpoints
//!
//! Credential checks only; session or token issuance is left to the caller.

use axum::{extract::State, routing::post, Router};
use serde::Deserialize;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, UserResponse};

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Check an email/password pair
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(email = %request.email, "Login attempt");

    let user = state
        .user_service
        .get_by_credentials(&request.email, &request.password)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    Ok(Json(UserResponse::from(&user)))
}
