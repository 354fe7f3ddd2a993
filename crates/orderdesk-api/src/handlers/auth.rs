use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use orderdesk_core::{
    auth::verify_password,
    models::{LoginRequest, LoginResponse, UserResponse},
    AppError,
};

use crate::auth::middleware::client_ip;
use crate::auth::models::CurrentUser;
use crate::auth::token;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v0/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 429, description = "Too many failed attempts")
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Response {
    let ip = client_ip(&headers);
    let limiter = &state.auth.failure_limiter;

    if limiter.is_blocked(&ip).await {
        return (StatusCode::TOO_MANY_REQUESTS, "Too many failed login attempts").into_response();
    }

    // One message for both unknown-user and wrong-password so the endpoint
    // does not leak which usernames exist.
    let reject = || {
        HttpAppError(AppError::Unauthorized(
            "Unknown username or wrong password".to_string(),
        ))
        .into_response()
    };

    let user = match state.db.users.find_by_username(&req.username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::debug!(username = %req.username, "Login attempt for unknown user");
            limiter.record_failure(&ip).await;
            return reject();
        }
        Err(e) => return HttpAppError::from(e).into_response(),
    };

    match verify_password(&req.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            tracing::debug!(username = %user.username, "Login attempt with wrong password");
            limiter.record_failure(&ip).await;
            return reject();
        }
        Err(e) => return HttpAppError::from(e).into_response(),
    }

    let token = match token::issue_token(&user, &state.auth.jwt_secret, state.auth.jwt_expiry_hours)
    {
        Ok(token) => token,
        Err(e) => return HttpAppError::from(e).into_response(),
    };

    tracing::info!(username = %user.username, "User logged in");
    Json(LoginResponse {
        token,
        user: UserResponse::from(user),
    })
    .into_response()
}

#[utoipa::path(
    get,
    path = "/api/v0/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "The authenticated account", body = UserResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn me(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
) -> Result<Json<UserResponse>, HttpAppError> {
    let user = state
        .db
        .users
        .get_user(current_user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Account no longer exists".to_string()))?;

    Ok(Json(UserResponse::from(user)))
}
