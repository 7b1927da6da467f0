use anyhow::Result;
use chrono::Utc;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{CreateTrainingSession, SessionStatus, TrainingSession, UpdateTrainingSession};

/// Editor-facing CRUD over training sessions. The report core never writes
/// through this service; it only reads what editors have published.
#[derive(Debug, Clone)]
pub struct TrainingSessionService {
    db: PgPool,
}

impl TrainingSessionService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create_session(&self, session_data: CreateTrainingSession) -> Result<TrainingSession> {
        let hours: Value = session_data.hours.unwrap_or_else(|| json!(0));
        let attendees: Value = session_data.attendees.unwrap_or_else(|| json!([]));

        let session = sqlx::query_as::<_, TrainingSession>(
            r#"
            INSERT INTO training_sessions (title, status, session_date, hours, attendees, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id, title, status, session_date, hours, attendees, created_at, updated_at
            "#,
        )
        .bind(&session_data.title)
        .bind(session_data.status.unwrap_or(SessionStatus::Draft))
        .bind(session_data.session_date)
        .bind(&hours)
        .bind(&attendees)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(session)
    }

    pub async fn get_session_by_id(&self, session_id: Uuid) -> Result<Option<TrainingSession>> {
        let session = sqlx::query_as::<_, TrainingSession>(
            "SELECT id, title, status, session_date, hours, attendees, created_at, updated_at \
             FROM training_sessions WHERE id = $1",
        )
        .bind(session_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(session)
    }

    pub async fn list_sessions(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<TrainingSession>> {
        let limit = limit.unwrap_or(50);
        let offset = offset.unwrap_or(0);

        let sessions = sqlx::query_as::<_, TrainingSession>(
            "SELECT id, title, status, session_date, hours, attendees, created_at, updated_at \
             FROM training_sessions ORDER BY session_date DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok(sessions)
    }

    pub async fn update_session(
        &self,
        session_id: Uuid,
        session_data: UpdateTrainingSession,
    ) -> Result<Option<TrainingSession>> {
        let session = sqlx::query_as::<_, TrainingSession>(
            r#"
            UPDATE training_sessions
            SET title = COALESCE($2, title),
                status = COALESCE($3, status),
                session_date = COALESCE($4, session_date),
                hours = COALESCE($5, hours),
                attendees = COALESCE($6, attendees),
                updated_at = $7
            WHERE id = $1
            RETURNING id, title, status, session_date, hours, attendees, created_at, updated_at
            "#,
        )
        .bind(session_id)
        .bind(session_data.title)
        .bind(session_data.status)
        .bind(session_data.session_date)
        .bind(session_data.hours)
        .bind(session_data.attendees)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await?;

        Ok(session)
    }

    /// Delete a session and hand back the deleted row so callers can refresh
    /// the totals of the attendees it used to carry.
    pub async fn delete_session(&self, session_id: Uuid) -> Result<Option<TrainingSession>> {
        let session = sqlx::query_as::<_, TrainingSession>(
            "DELETE FROM training_sessions WHERE id = $1 \
             RETURNING id, title, status, session_date, hours, attendees, created_at, updated_at",
        )
        .bind(session_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(session)
    }
}
