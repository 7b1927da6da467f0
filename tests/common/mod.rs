use chrono::{NaiveDate, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use training_hours_report::models::{SessionStatus, TrainingSession};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Roster entry in the bare-identifier form.
pub fn bare_attendee(user_id: Uuid) -> Value {
    json!(user_id.to_string())
}

/// Roster entry in the structured form the editor produces for linked users.
pub fn structured_attendee(user_id: Uuid) -> Value {
    json!({"id": user_id.to_string(), "name": "Attendee"})
}

pub fn published_session(session_date: NaiveDate, hours: Value, attendees: Value) -> TrainingSession {
    session(session_date, SessionStatus::Published, hours, attendees)
}

pub fn session(
    session_date: NaiveDate,
    status: SessionStatus,
    hours: Value,
    attendees: Value,
) -> TrainingSession {
    let now = Utc::now();
    TrainingSession {
        id: Uuid::new_v4(),
        title: "First aid refresher".to_string(),
        status,
        session_date,
        hours,
        attendees,
        created_at: now,
        updated_at: now,
    }
}
