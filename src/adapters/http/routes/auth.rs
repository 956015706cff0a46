//! Session routes: login, refresh, logout and the caller's own identity.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    adapters::http::{
        app_state::AppState,
        middleware::{authorize, bearer_from_headers},
    },
    app_error::{AppError, AppResult},
};

#[derive(Deserialize)]
struct LoginPayload {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Serialize)]
struct LoginResponse {
    message: &'static str,
    access_token: String,
    refresh_token: String,
}

#[derive(Deserialize)]
struct RefreshPayload {
    refresh_token: Option<String>,
}

#[derive(Serialize)]
struct RefreshResponse {
    access_token: String,
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

/// POST /api/auth/login
async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> AppResult<impl IntoResponse> {
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let pair = app_state
        .session_use_cases
        .login(&email, &password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            message: "Login successful",
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }),
    ))
}

/// POST /api/auth/refresh
async fn refresh(
    State(app_state): State<AppState>,
    Json(payload): Json<RefreshPayload>,
) -> AppResult<impl IntoResponse> {
    let refresh_token = required_refresh_token(payload.refresh_token)?;

    let access_token = app_state
        .session_use_cases
        .refresh(&refresh_token)
        .await?;

    Ok((StatusCode::OK, Json(RefreshResponse { access_token })))
}

/// POST /api/auth/logout
/// Revokes the bearer access token and the refresh token from the body.
async fn logout(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<RefreshPayload>,
) -> AppResult<impl IntoResponse> {
    let access_token = bearer_from_headers(&headers).ok_or(AppError::MissingCredentials)?;
    let refresh_token = required_refresh_token(payload.refresh_token)?;

    app_state
        .session_use_cases
        .logout(access_token, &refresh_token)
        .await?;

    Ok((StatusCode::OK, Json(MessageResponse { message: "Logged out" })))
}

/// GET /api/auth/me
async fn me(
    State(app_state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let caller = authorize(&app_state, &headers, &[]).await?;
    Ok((StatusCode::OK, Json(caller)))
}

fn required_refresh_token(token: Option<String>) -> AppResult<String> {
    token
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Refresh token is required".into()))
}
