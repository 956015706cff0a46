use axum::http::{HeaderMap, header::AUTHORIZATION};

use crate::{
    adapters::http::app_state::AppState,
    app_error::AppResult,
    application::use_cases::authorization::AuthenticatedContext,
    domain::entities::role::Role,
};

/// Guard for protected handlers. Call it first, with the roles the route
/// accepts (empty slice: any authenticated caller).
pub async fn authorize(
    app_state: &AppState,
    headers: &HeaderMap,
    required_roles: &[Role],
) -> AppResult<AuthenticatedContext> {
    let authorization = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    app_state
        .authorizer
        .authorize(authorization, required_roles)
        .await
}

/// Raw bearer token from the request, for routes that act on the token itself.
pub fn bearer_from_headers(headers: &HeaderMap) -> Option<&str> {
    crate::application::use_cases::authorization::bearer_token(
        headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
    )
}
