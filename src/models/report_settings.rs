use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_REQUIRED_HOURS: f64 = 4.0;
pub const DEFAULT_SUCCESS_COLOR: &str = "#d4edda";
pub const DEFAULT_FAIL_COLOR: &str = "#f8d7da";

/// Report configuration: the pass/fail threshold and the badge background
/// colors. Persisted as a single row; any field missing from storage falls
/// back to these defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ReportSettings {
    pub required_hours: f64,
    pub success_color: String,
    pub fail_color: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            required_hours: DEFAULT_REQUIRED_HOURS,
            success_color: DEFAULT_SUCCESS_COLOR.to_string(),
            fail_color: DEFAULT_FAIL_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateReportSettings {
    pub required_hours: Option<f64>,
    pub success_color: Option<String>,
    pub fail_color: Option<String>,
}

impl UpdateReportSettings {
    /// Merge this partial update onto an existing settings record. Unset
    /// fields keep their current value.
    pub fn apply_to(self, current: ReportSettings) -> ReportSettings {
        ReportSettings {
            required_hours: self.required_hours.unwrap_or(current.required_hours),
            success_color: self.success_color.unwrap_or(current.success_color),
            fail_color: self.fail_color.unwrap_or(current.fail_color),
        }
    }
}
