use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{error, warn};
use uuid::Uuid;

use super::routes::AppState;
use super::PaginationQuery;
use crate::config::RecomputePolicy;
use crate::render::{render_status, StatusBadge};

/// One row of the admin user list: identity plus the rendered hours column.
#[derive(Debug, Serialize)]
pub struct AdminUserRow {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub training_hours_total: f64,
    pub status: StatusBadge,
    pub status_html: String,
}

/// Admin user list with the color-coded monthly hours column.
///
/// Under the `on_render` policy every row is recomputed here, so the column
/// is always fresh at the cost of re-querying per page view. Under `on_save`
/// the cached totals are served as-is. A failed recompute degrades that row
/// to a 0.0 total instead of failing the whole list.
pub async fn list_users_with_hours(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<Vec<AdminUserRow>>, StatusCode> {
    if pagination.validate().is_err() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let settings = state.settings_service.get_settings().await.unwrap_or_else(|e| {
        warn!("falling back to default report settings: {}", e);
        Default::default()
    });

    let users = state
        .user_service
        .list_users(Some(pagination.get_limit()), Some(pagination.get_offset()))
        .await
        .map_err(|e| {
            error!("failed to list users: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let today = Utc::now().date_naive();
    let mut rows = Vec::with_capacity(users.len());

    for user in users {
        let total = match state.recompute_policy {
            RecomputePolicy::OnRender => state
                .hours_service
                .compute_monthly_hours(user.id, today)
                .await
                .unwrap_or_else(|e| {
                    warn!(user_id = %user.id, "inline hours recompute failed: {}", e);
                    0.0
                }),
            RecomputePolicy::OnSave => user.training_hours_total,
        };

        let status = render_status(total, &settings);
        let status_html = status.to_html();

        rows.push(AdminUserRow {
            id: user.id,
            email: user.email,
            role: user.role,
            training_hours_total: total,
            status,
            status_html,
        });
    }

    Ok(Json(rows))
}
