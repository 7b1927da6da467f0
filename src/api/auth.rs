use axum::{extract::State, response::Json};

use super::routes::AppState;
use crate::auth::{AuthError, AuthResponse, LoginRequest};

/// Exchange email/password credentials for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let response = state.auth_service.login(request).await?;
    Ok(Json(response))
}
