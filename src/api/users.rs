//! User management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Router,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, CreateUserApiRequest, Json, ListUsersQuery, ListUsersResponse,
    UpdatePasswordApiRequest, UpdateUserApiRequest, UserResponse,
};
use crate::domain::user::{User, UserId, UserSelector};
use crate::domain::DomainError;

/// Create the users router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).patch(update_user).delete(delete_user))
        .route("/{id}/activate", post(activate_user))
        .route("/{id}/password", put(update_password))
}

fn parse_selector(id: &str) -> Result<UserSelector, ApiError> {
    UserId::parse(id)
        .map(UserSelector::Id)
        .map_err(|e| ApiError::from(DomainError::invalid_id(e.to_string())))
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<ListUsersResponse>, ApiError> {
    debug!(status = ?query.status, email = ?query.email, "Listing users");

    let users: Vec<User> = match query.email {
        Some(email) => state
            .user_service
            .find_by_email(&email)
            .await?
            .into_iter()
            .filter(|u| query.status.is_none_or(|s| u.status() == s))
            .collect(),
        None => state.user_service.list(query.status).await?,
    };
    let users: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    let total = users.len();

    Ok(Json(ListUsersResponse { users, total }))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserApiRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    debug!(email = %request.email, "Creating user");

    let user = state.user_service.create(request.into()).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let selector = parse_selector(&id)?;

    let user = state
        .user_service
        .find_one(&selector)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", id)))?;

    Ok(Json(UserResponse::from(&user)))
}

/// PATCH /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserApiRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(id = %id, "Updating user");

    let selector = parse_selector(&id)?;
    let user = state.user_service.update(&selector, request.into()).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(id = %id, "Deleting user");

    let selector = parse_selector(&id)?;

    if state.user_service.delete(&selector).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("User '{}' not found", id)))
    }
}

/// POST /users/{id}/activate
pub async fn activate_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let selector = parse_selector(&id)?;
    let user = state.user_service.activate(&selector).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// PUT /users/{id}/password
pub async fn update_password(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdatePasswordApiRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let selector = parse_selector(&id)?;
    let user = state
        .user_service
        .update_password(&selector, request.into())
        .await?;

    Ok(Json(UserResponse::from(&user)))
}
