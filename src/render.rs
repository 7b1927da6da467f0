//! Presentation of a user's monthly total as a pass/fail badge.

use serde::{Deserialize, Serialize};

use crate::models::ReportSettings;

const SUCCESS_TEXT_COLOR: &str = "#155724";
const FAIL_TEXT_COLOR: &str = "#721c24";

/// A rendered status badge: label text plus the colors picked for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusBadge {
    pub label: String,
    pub background: String,
    pub color: String,
    pub passed: bool,
}

impl StatusBadge {
    /// Inline-styled markup for embedding in an admin list cell.
    pub fn to_html(&self) -> String {
        format!(
            "<span style=\"background-color:{};color:{};padding:2px 8px;border-radius:3px;\">{}</span>",
            self.background, self.color, self.label
        )
    }
}

/// Classify `total_hours` against the configured threshold and produce the
/// badge. Meeting the threshold exactly counts as a pass. Pure function; the
/// caller supplies both the cached total and the current settings.
pub fn render_status(total_hours: f64, settings: &ReportSettings) -> StatusBadge {
    let passed = total_hours >= settings.required_hours;
    let (background, color) = if passed {
        (settings.success_color.clone(), SUCCESS_TEXT_COLOR.to_string())
    } else {
        (settings.fail_color.clone(), FAIL_TEXT_COLOR.to_string())
    };

    StatusBadge {
        label: format!("{:.1} hours", total_hours),
        background,
        color,
        passed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_meeting_threshold_exactly_passes() {
        let badge = render_status(4.0, &ReportSettings::default());

        assert!(badge.passed);
        assert_eq!(badge.background, "#d4edda");
        assert_eq!(badge.color, "#155724");
    }

    #[test]
    fn test_just_under_threshold_fails() {
        let badge = render_status(3.99, &ReportSettings::default());

        assert!(!badge.passed);
        assert_eq!(badge.background, "#f8d7da");
        assert_eq!(badge.color, "#721c24");
    }

    #[test]
    fn test_label_uses_one_decimal_place() {
        assert_eq!(render_status(4.0, &ReportSettings::default()).label, "4.0 hours");
        assert_eq!(render_status(2.25, &ReportSettings::default()).label, "2.2 hours");
        assert_eq!(render_status(0.0, &ReportSettings::default()).label, "0.0 hours");
    }

    #[test]
    fn test_configured_colors_flow_through() {
        let settings = ReportSettings {
            required_hours: 1.0,
            success_color: "#aaffaa".to_string(),
            fail_color: "#ffaaaa".to_string(),
        };

        let pass = render_status(2.0, &settings);
        assert_eq!(pass.background, "#aaffaa");

        let fail = render_status(0.5, &settings);
        assert_eq!(fail.background, "#ffaaaa");
    }

    #[test]
    fn test_html_embeds_colors_and_label() {
        let badge = render_status(5.5, &ReportSettings::default());
        let html = badge.to_html();

        assert!(html.contains("background-color:#d4edda"));
        assert!(html.contains("5.5 hours"));
    }
}
