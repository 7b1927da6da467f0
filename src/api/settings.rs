use axum::{extract::State, http::StatusCode, response::Json};
use tracing::error;

use super::routes::AppState;
use crate::models::{ReportSettings, UpdateReportSettings};

/// Current report settings, with defaults for anything never configured.
pub async fn get_report_settings(
    State(state): State<AppState>,
) -> Result<Json<ReportSettings>, StatusCode> {
    let settings = state.settings_service.get_settings().await.map_err(|e| {
        error!("failed to load report settings: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(settings))
}

/// Partial update of the report settings. Colors are stored as free text;
/// the threshold must be a finite, non-negative number of hours.
pub async fn update_report_settings(
    State(state): State<AppState>,
    Json(update): Json<UpdateReportSettings>,
) -> Result<Json<ReportSettings>, StatusCode> {
    if let Some(required_hours) = update.required_hours {
        if !required_hours.is_finite() || required_hours < 0.0 {
            return Err(StatusCode::BAD_REQUEST);
        }
    }

    let settings = state
        .settings_service
        .update_settings(update)
        .await
        .map_err(|e| {
            error!("failed to update report settings: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(settings))
}
