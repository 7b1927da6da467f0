use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "session_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Draft,
    Published,
}

/// A training session record as authored in the content editor.
///
/// `hours` and `attendees` are free-form custom fields: `hours` may be a JSON
/// number, a numeric string, or junk; `attendees` is a JSON array whose
/// entries are bare user-id strings or objects carrying an id field. The
/// aggregation code resolves both tolerantly.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TrainingSession {
    pub id: Uuid,
    pub title: String,
    pub status: SessionStatus,
    pub session_date: NaiveDate,
    pub hours: Value,
    pub attendees: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTrainingSession {
    pub title: String,
    pub status: Option<SessionStatus>,
    pub session_date: NaiveDate,
    pub hours: Option<Value>,
    pub attendees: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateTrainingSession {
    pub title: Option<String>,
    pub status: Option<SessionStatus>,
    pub session_date: Option<NaiveDate>,
    pub hours: Option<Value>,
    pub attendees: Option<Value>,
}
