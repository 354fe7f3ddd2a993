//! Account administration (superuser only).

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use orderdesk_core::{
    auth::hash_password,
    models::{ChangePasswordRequest, CreateUserRequest, UserResponse},
    AppError,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::models::CurrentUser;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v0/users",
    tag = "users",
    responses(
        (status = 200, description = "All accounts", body = Vec<UserResponse>),
        (status = 403, description = "Not a superuser", body = ErrorResponse)
    )
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
) -> Result<Json<Vec<UserResponse>>, HttpAppError> {
    current_user.require_superuser()?;

    let users = state.db.users.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v0/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 403, description = "Not a superuser", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), HttpAppError> {
    current_user.require_superuser()?;
    req.validate().map_err(AppError::from)?;

    let password_hash = hash_password(&req.password)?;
    let user = state
        .db
        .users
        .create_user(&req.username, &password_hash, req.is_superuser)
        .await?;

    tracing::info!(username = %user.username, created_by = %current_user.username, "Account created");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(
    delete,
    path = "/api/v0/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "Account ID")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 403, description = "Not a superuser", body = ErrorResponse),
        (status = 404, description = "No such account", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    current_user.require_superuser()?;

    if current_user.user_id == id {
        return Err(HttpAppError(AppError::BadRequest(
            "Cannot delete your own account".to_string(),
        )));
    }

    let deleted = state.db.users.delete_user(id).await?;
    if !deleted {
        return Err(HttpAppError(AppError::NotFound(format!(
            "User {} not found",
            id
        ))));
    }

    tracing::info!(user_id = %id, deleted_by = %current_user.username, "Account deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/api/v0/users/{id}/password",
    tag = "users",
    params(("id" = Uuid, Path, description = "Account ID")),
    request_body = ChangePasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 403, description = "Not a superuser", body = ErrorResponse),
        (status = 404, description = "No such account", body = ErrorResponse)
    )
)]
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> Result<StatusCode, HttpAppError> {
    current_user.require_superuser()?;
    req.validate().map_err(AppError::from)?;

    let password_hash = hash_password(&req.new_password)?;
    state.db.users.update_password(id, &password_hash).await?;

    tracing::info!(user_id = %id, changed_by = %current_user.username, "Password changed");
    Ok(StatusCode::NO_CONTENT)
}
