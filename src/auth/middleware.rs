use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tower_http::cors::{Any, CorsLayer};

use crate::auth::{extract_bearer_token, AuthError, Claims, JwtService, UserRole};

/// JWT authentication middleware: validates the bearer token and makes the
/// claims available to downstream handlers via request extensions.
pub async fn jwt_auth_middleware(
    State(jwt_service): State<JwtService>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(AuthError::MissingAuthHeader)?;

    let token = extract_bearer_token(auth_header)?;
    let claims = jwt_service.validate_token(token)?;

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

fn claims_role(request: &Request) -> Result<UserRole, AuthError> {
    request
        .extensions()
        .get::<Claims>()
        .map(|claims| claims.role)
        .ok_or(AuthError::InsufficientPermissions)
}

/// Session editing requires editor privileges.
pub async fn editor_middleware(request: Request, next: Next) -> Result<Response, AuthError> {
    if !claims_role(&request)?.can_access(&UserRole::Editor) {
        return Err(AuthError::InsufficientPermissions);
    }

    Ok(next.run(request).await)
}

/// The report column and the settings form are admin-only.
pub async fn admin_middleware(request: Request, next: Next) -> Result<Response, AuthError> {
    if !claims_role(&request)?.can_access(&UserRole::Admin) {
        return Err(AuthError::InsufficientPermissions);
    }

    Ok(next.run(request).await)
}

/// CORS configuration for the API
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
