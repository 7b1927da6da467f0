use anyhow::Result;
use chrono::{Datelike, Months, NaiveDate, Utc};
use serde_json::Value;
use sqlx::PgPool;
use std::collections::HashSet;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{SessionStatus, TrainingSession};

/// First and last calendar day of the month containing `reference`.
pub fn month_window(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = reference.with_day(1).unwrap_or(reference);
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(start);
    (start, end)
}

/// Numeric value of a session's `hours` custom field. The editor stores it as
/// whatever JSON it was typed as; anything that does not parse as a number
/// counts as 0 rather than poisoning the sum.
pub fn hours_value(raw: &Value) -> f64 {
    match raw {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Resolve one attendee entry to a user id. Entries come in two shapes: a
/// bare id string, or an object carrying the id under `id` or `user_id`.
/// Anything else is skipped.
pub fn attendee_id(entry: &Value) -> Option<Uuid> {
    match entry {
        Value::String(s) => Uuid::parse_str(s.trim()).ok(),
        Value::Object(map) => map
            .get("id")
            .or_else(|| map.get("user_id"))
            .and_then(Value::as_str)
            .and_then(|s| Uuid::parse_str(s.trim()).ok()),
        _ => None,
    }
}

/// All resolvable attendee ids of a session, deduplicated.
pub fn session_attendees(session: &TrainingSession) -> HashSet<Uuid> {
    session
        .attendees
        .as_array()
        .map(|entries| entries.iter().filter_map(attendee_id).collect())
        .unwrap_or_default()
}

fn session_includes(session: &TrainingSession, user_id: Uuid) -> bool {
    session
        .attendees
        .as_array()
        .map(|entries| entries.iter().filter_map(attendee_id).any(|id| id == user_id))
        .unwrap_or(false)
}

/// Sum the hours of every published session inside `window` that lists
/// `user_id` as an attendee. Plain f64 accumulation, no rounding; an empty
/// match set yields 0.0.
pub fn sum_session_hours(
    sessions: &[TrainingSession],
    user_id: Uuid,
    window: (NaiveDate, NaiveDate),
) -> f64 {
    let (start, end) = window;
    sessions
        .iter()
        .filter(|s| s.status == SessionStatus::Published)
        .filter(|s| s.session_date >= start && s.session_date <= end)
        .filter(|s| session_includes(s, user_id))
        .map(|s| hours_value(&s.hours))
        .sum()
}

/// The aggregation engine: computes per-user monthly hour totals and writes
/// them through to the cached column on the user row.
#[derive(Debug, Clone)]
pub struct TrainingHoursService {
    db: PgPool,
}

impl TrainingHoursService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn published_sessions_in(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TrainingSession>> {
        let sessions = sqlx::query_as::<_, TrainingSession>(
            "SELECT id, title, status, session_date, hours, attendees, created_at, updated_at \
             FROM training_sessions \
             WHERE status = $1 AND session_date >= $2 AND session_date <= $3",
        )
        .bind(SessionStatus::Published)
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;

        Ok(sessions)
    }

    /// Sum the hours of every published session in `reference`'s calendar
    /// month that lists `user_id` as an attendee, then persist the total into
    /// the user's cached column.
    ///
    /// This is a write-through cache, not a pure function: calling it always
    /// overwrites the stored total. An unknown user yields 0.0 and no write.
    pub async fn compute_monthly_hours(&self, user_id: Uuid, reference: NaiveDate) -> Result<f64> {
        let known = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.db)
            .await?;

        if !known {
            debug!(%user_id, "skipping hours recompute for unknown user");
            return Ok(0.0);
        }

        let window = month_window(reference);
        let sessions = self.published_sessions_in(window.0, window.1).await?;
        let total = sum_session_hours(&sessions, user_id, window);

        sqlx::query("UPDATE users SET training_hours_total = $2, updated_at = $3 WHERE id = $1")
            .bind(user_id)
            .bind(total)
            .bind(Utc::now())
            .execute(&self.db)
            .await?;

        Ok(total)
    }

    /// Read a user's cached total without recomputing it.
    pub async fn cached_total(&self, user_id: Uuid) -> Result<Option<f64>> {
        let total =
            sqlx::query_scalar::<_, f64>("SELECT training_hours_total FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.db)
                .await?;

        Ok(total)
    }

    /// Refresh the current-month total for a set of users. One failing user
    /// is logged and skipped so the others still refresh. Returns the number
    /// of users recomputed.
    pub async fn recompute_users(&self, user_ids: HashSet<Uuid>) -> Result<usize> {
        let today = Utc::now().date_naive();
        let mut recomputed = 0;

        for user_id in user_ids {
            match self.compute_monthly_hours(user_id, today).await {
                Ok(total) => {
                    debug!(%user_id, total, "recomputed monthly hours");
                    recomputed += 1;
                }
                Err(e) => {
                    warn!(%user_id, "hours recompute failed: {}", e);
                }
            }
        }

        Ok(recomputed)
    }

    /// Event trigger: refresh the current-month total for every attendee of
    /// `session`. Used after a session is created, updated or deleted.
    pub async fn recompute_for_session(&self, session: &TrainingSession) -> Result<usize> {
        self.recompute_users(session_attendees(session)).await
    }

    /// Batch trigger: refresh the current-month total for every user. One
    /// failing user is logged and skipped so the rest of the batch still
    /// runs. Returns the number of users recomputed.
    pub async fn recompute_all_users(&self) -> Result<usize> {
        let today = Utc::now().date_naive();
        let user_ids = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users")
            .fetch_all(&self.db)
            .await?;

        let mut recomputed = 0;
        for user_id in user_ids {
            match self.compute_monthly_hours(user_id, today).await {
                Ok(_) => recomputed += 1,
                Err(e) => warn!(%user_id, "batch hours recompute failed: {}", e),
            }
        }

        Ok(recomputed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session(
        session_date: NaiveDate,
        status: SessionStatus,
        hours: Value,
        attendees: Value,
    ) -> TrainingSession {
        let created: DateTime<Utc> = Utc::now();
        TrainingSession {
            id: Uuid::new_v4(),
            title: "Monthly safety briefing".to_string(),
            status,
            session_date,
            hours,
            attendees,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_month_window_mid_month() {
        let (start, end) = month_window(date(2024, 3, 17));
        assert_eq!(start, date(2024, 3, 1));
        assert_eq!(end, date(2024, 3, 31));
    }

    #[test]
    fn test_month_window_december_rollover() {
        let (start, end) = month_window(date(2024, 12, 31));
        assert_eq!(start, date(2024, 12, 1));
        assert_eq!(end, date(2024, 12, 31));
    }

    #[test]
    fn test_month_window_leap_february() {
        let (_, end) = month_window(date(2024, 2, 10));
        assert_eq!(end, date(2024, 2, 29));

        let (_, end) = month_window(date(2023, 2, 10));
        assert_eq!(end, date(2023, 2, 28));
    }

    #[test]
    fn test_hours_value_tolerates_junk() {
        assert_eq!(hours_value(&json!(2.5)), 2.5);
        assert_eq!(hours_value(&json!(3)), 3.0);
        assert_eq!(hours_value(&json!("1.5")), 1.5);
        assert_eq!(hours_value(&json!(" 2 ")), 2.0);
        assert_eq!(hours_value(&json!("N/A")), 0.0);
        assert_eq!(hours_value(&json!(null)), 0.0);
        assert_eq!(hours_value(&json!([1, 2])), 0.0);
    }

    #[test]
    fn test_attendee_id_both_forms() {
        let user = Uuid::new_v4();

        assert_eq!(attendee_id(&json!(user.to_string())), Some(user));
        assert_eq!(attendee_id(&json!({"id": user.to_string()})), Some(user));
        assert_eq!(
            attendee_id(&json!({"user_id": user.to_string()})),
            Some(user)
        );
        assert_eq!(attendee_id(&json!("not-a-uuid")), None);
        assert_eq!(attendee_id(&json!(42)), None);
        assert_eq!(attendee_id(&json!({"name": "no id here"})), None);
    }

    #[test]
    fn test_sum_matches_expected_total() {
        let user = Uuid::new_v4();
        let window = month_window(date(2024, 5, 15));
        let roster = json!([user.to_string()]);

        let sessions = vec![
            session(date(2024, 5, 3), SessionStatus::Published, json!(2.5), roster.clone()),
            session(date(2024, 5, 10), SessionStatus::Published, json!(1.5), roster.clone()),
            session(date(2024, 5, 20), SessionStatus::Published, json!(0), roster),
        ];

        assert_eq!(sum_session_hours(&sessions, user, window), 4.0);
    }

    #[test]
    fn test_sum_excludes_sessions_outside_window() {
        let user = Uuid::new_v4();
        let window = month_window(date(2024, 5, 15));
        let roster = json!([user.to_string()]);

        let sessions = vec![
            // Day before the window opens and day after it closes.
            session(date(2024, 4, 30), SessionStatus::Published, json!(3.0), roster.clone()),
            session(date(2024, 6, 1), SessionStatus::Published, json!(3.0), roster.clone()),
            session(date(2024, 5, 1), SessionStatus::Published, json!(1.0), roster.clone()),
            session(date(2024, 5, 31), SessionStatus::Published, json!(1.0), roster),
        ];

        assert_eq!(sum_session_hours(&sessions, user, window), 2.0);
    }

    #[test]
    fn test_sum_excludes_drafts_and_other_rosters() {
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        let window = month_window(date(2024, 5, 15));

        let sessions = vec![
            session(
                date(2024, 5, 5),
                SessionStatus::Draft,
                json!(8.0),
                json!([user.to_string()]),
            ),
            session(
                date(2024, 5, 6),
                SessionStatus::Published,
                json!(2.0),
                json!([other.to_string()]),
            ),
        ];

        assert_eq!(sum_session_hours(&sessions, user, window), 0.0);
    }

    #[test]
    fn test_sum_skips_malformed_attendee_entries() {
        let user = Uuid::new_v4();
        let window = month_window(date(2024, 5, 15));

        let sessions = vec![session(
            date(2024, 5, 8),
            SessionStatus::Published,
            json!(2.0),
            json!([42, "garbage", {"id": user.to_string()}]),
        )];

        assert_eq!(sum_session_hours(&sessions, user, window), 2.0);
    }

    #[test]
    fn test_sum_with_no_sessions_is_zero() {
        let user = Uuid::new_v4();
        let window = month_window(date(2024, 5, 15));

        assert_eq!(sum_session_hours(&[], user, window), 0.0);
    }

    #[test]
    fn test_session_attendees_dedupes() {
        let user = Uuid::new_v4();
        let s = session(
            date(2024, 5, 8),
            SessionStatus::Published,
            json!(1.0),
            json!([user.to_string(), {"id": user.to_string()}]),
        );

        assert_eq!(session_attendees(&s).len(), 1);
    }
}
