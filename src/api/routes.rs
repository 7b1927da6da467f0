use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use super::auth::login;
use super::health::health_check;
use super::settings::{get_report_settings, update_report_settings};
use super::training::{create_session, delete_session, list_sessions, update_session};
use super::users::list_users_with_hours;
use crate::auth::middleware::{admin_middleware, cors_layer, editor_middleware, jwt_auth_middleware};
use crate::auth::{AuthService, JwtService};
use crate::config::{AppConfig, RecomputePolicy};
use crate::services::{
    ReportSettingsService, TrainingHoursService, TrainingSessionService, UserService,
};

#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub session_service: TrainingSessionService,
    pub hours_service: TrainingHoursService,
    pub settings_service: ReportSettingsService,
    pub recompute_policy: RecomputePolicy,
}

pub fn create_routes(db: PgPool, config: &AppConfig) -> Router {
    let jwt_service = JwtService::new(&config.jwt_secret);
    let user_service = UserService::new(db.clone());

    let state = AppState {
        auth_service: AuthService::new(user_service.clone(), jwt_service.clone()),
        user_service,
        session_service: TrainingSessionService::new(db.clone()),
        hours_service: TrainingHoursService::new(db.clone()),
        settings_service: ReportSettingsService::new(db),
        recompute_policy: config.recompute_policy,
    };

    let editor_routes = Router::new()
        .route("/sessions", post(create_session).get(list_sessions))
        .route("/sessions/:session_id", put(update_session).delete(delete_session))
        .layer(middleware::from_fn(editor_middleware));

    let admin_routes = Router::new()
        .route("/admin/settings", get(get_report_settings).put(update_report_settings))
        .route("/admin/users", get(list_users_with_hours))
        .layer(middleware::from_fn(admin_middleware));

    // The login route is added after the JWT layer so it stays public.
    let api_routes = editor_routes
        .merge(admin_routes)
        .layer(middleware::from_fn_with_state(jwt_service, jwt_auth_middleware))
        .route("/auth/login", post(login));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}
