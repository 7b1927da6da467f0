use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, warn};
use uuid::Uuid;

use super::routes::AppState;
use super::PaginationQuery;
use crate::config::RecomputePolicy;
use crate::models::{CreateTrainingSession, TrainingSession, UpdateTrainingSession};
use crate::services::training_hours_service::session_attendees;

/// Create a training session. Under the `on_save` policy the cached totals
/// of its attendees are refreshed before the response returns.
pub async fn create_session(
    State(state): State<AppState>,
    Json(session_data): Json<CreateTrainingSession>,
) -> Result<(StatusCode, Json<TrainingSession>), StatusCode> {
    let session = state
        .session_service
        .create_session(session_data)
        .await
        .map_err(|e| {
            error!("failed to create training session: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    refresh_attendees(&state, &session, None).await;

    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn list_sessions(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<Vec<TrainingSession>>, StatusCode> {
    if pagination.validate().is_err() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let sessions = state
        .session_service
        .list_sessions(Some(pagination.get_limit()), Some(pagination.get_offset()))
        .await
        .map_err(|e| {
            error!("failed to list training sessions: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(sessions))
}

/// Update a training session. Attendees removed by the edit are refreshed
/// along with the current roster, so nobody keeps hours from a session they
/// were taken off of.
pub async fn update_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(session_data): Json<UpdateTrainingSession>,
) -> Result<Json<TrainingSession>, StatusCode> {
    let before = state
        .session_service
        .get_session_by_id(session_id)
        .await
        .map_err(|e| {
            error!("failed to load training session: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    let session = state
        .session_service
        .update_session(session_id, session_data)
        .await
        .map_err(|e| {
            error!("failed to update training session: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    refresh_attendees(&state, &session, Some(&before)).await;

    Ok(Json(session))
}

/// Delete a training session and refresh the totals of the attendees it
/// carried.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let deleted = state
        .session_service
        .delete_session(session_id)
        .await
        .map_err(|e| {
            error!("failed to delete training session: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    refresh_attendees(&state, &deleted, None).await;

    Ok(StatusCode::NO_CONTENT)
}

/// Event-driven recompute after a save. The union of the previous and the
/// saved roster is refreshed; a failure here is logged but never fails the
/// save itself, since the monthly batch job will catch the drift.
async fn refresh_attendees(
    state: &AppState,
    session: &TrainingSession,
    previous: Option<&TrainingSession>,
) {
    if state.recompute_policy != RecomputePolicy::OnSave {
        return;
    }

    let mut user_ids = session_attendees(session);
    if let Some(previous) = previous {
        user_ids.extend(session_attendees(previous));
    }

    if let Err(e) = state.hours_service.recompute_users(user_ids).await {
        warn!(session_id = %session.id, "attendee hours refresh failed: {}", e);
    }
}
