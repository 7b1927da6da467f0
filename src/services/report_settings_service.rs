use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;

use crate::models::{ReportSettings, UpdateReportSettings};

/// Persistence for the single report-settings record. Reads substitute
/// defaults when the row has never been written; updates merge field-wise
/// onto the current values. Changing the threshold never touches any cached
/// user total, only how the next render classifies it.
#[derive(Debug, Clone)]
pub struct ReportSettingsService {
    db: PgPool,
}

impl ReportSettingsService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn get_settings(&self) -> Result<ReportSettings> {
        let settings = sqlx::query_as::<_, ReportSettings>(
            "SELECT required_hours, success_color, fail_color FROM report_settings WHERE id = TRUE",
        )
        .fetch_optional(&self.db)
        .await?;

        Ok(settings.unwrap_or_default())
    }

    pub async fn update_settings(&self, update: UpdateReportSettings) -> Result<ReportSettings> {
        let merged = update.apply_to(self.get_settings().await?);

        sqlx::query(
            r#"
            INSERT INTO report_settings (id, required_hours, success_color, fail_color, updated_at)
            VALUES (TRUE, $1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET required_hours = EXCLUDED.required_hours,
                success_color = EXCLUDED.success_color,
                fail_color = EXCLUDED.fail_color,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(merged.required_hours)
        .bind(&merged.success_color)
        .bind(&merged.fail_color)
        .bind(Utc::now())
        .execute(&self.db)
        .await?;

        Ok(merged)
    }
}
