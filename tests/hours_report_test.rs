mod common;

use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use common::{bare_attendee, date, published_session, structured_attendee};
use training_hours_report::models::{ReportSettings, UpdateReportSettings};
use training_hours_report::render::render_status;
use training_hours_report::services::training_hours_service::{month_window, sum_session_hours};

#[test]
fn test_no_matching_sessions_yields_zero() {
    let user = Uuid::new_v4();
    let other = Uuid::new_v4();
    let window = month_window(date(2024, 7, 15));

    let sessions = vec![published_session(
        date(2024, 7, 10),
        json!(3.0),
        json!([bare_attendee(other)]),
    )];

    assert_eq!(sum_session_hours(&sessions, user, window), 0.0);
}

#[test]
fn test_hours_sum_across_sessions() {
    let user = Uuid::new_v4();
    let window = month_window(date(2024, 7, 15));

    let sessions = vec![
        published_session(date(2024, 7, 2), json!(2.5), json!([bare_attendee(user)])),
        published_session(date(2024, 7, 16), json!(1.5), json!([bare_attendee(user)])),
        published_session(date(2024, 7, 30), json!(0), json!([bare_attendee(user)])),
    ];

    assert_eq!(sum_session_hours(&sessions, user, window), 4.0);
}

#[test]
fn test_adjacent_months_are_excluded() {
    let user = Uuid::new_v4();
    let window = month_window(date(2024, 7, 15));

    let sessions = vec![
        // The day before the window opens and the day after it closes.
        published_session(date(2024, 6, 30), json!(2.0), json!([bare_attendee(user)])),
        published_session(date(2024, 8, 1), json!(2.0), json!([bare_attendee(user)])),
    ];

    assert_eq!(sum_session_hours(&sessions, user, window), 0.0);
}

#[test]
fn test_non_numeric_hours_count_as_zero() {
    let user = Uuid::new_v4();
    let window = month_window(date(2024, 7, 15));

    let sessions = vec![
        published_session(date(2024, 7, 3), json!("N/A"), json!([bare_attendee(user)])),
        published_session(date(2024, 7, 4), json!(1.5), json!([bare_attendee(user)])),
    ];

    assert_eq!(sum_session_hours(&sessions, user, window), 1.5);
}

#[test]
fn test_both_attendee_forms_count_identically() {
    let user = Uuid::new_v4();
    let window = month_window(date(2024, 7, 15));

    let bare = vec![published_session(
        date(2024, 7, 5),
        json!(2.0),
        json!([bare_attendee(user)]),
    )];
    let structured = vec![published_session(
        date(2024, 7, 5),
        json!(2.0),
        json!([structured_attendee(user)]),
    )];

    assert_eq!(
        sum_session_hours(&bare, user, window),
        sum_session_hours(&structured, user, window)
    );
}

#[test]
fn test_threshold_boundary_is_a_pass() {
    let settings = ReportSettings::default();

    assert!(render_status(4.0, &settings).passed);
    assert!(!render_status(3.99, &settings).passed);
}

#[test]
fn test_threshold_change_only_affects_classification() {
    // The cached total is whatever the last aggregation produced; moving the
    // threshold reclassifies it on the next render without recomputation.
    let cached_total = 4.0;

    let lenient = ReportSettings::default();
    assert!(render_status(cached_total, &lenient).passed);

    let strict = UpdateReportSettings {
        required_hours: Some(5.0),
        ..Default::default()
    }
    .apply_to(lenient);

    let badge = render_status(cached_total, &strict);
    assert!(!badge.passed);
    assert_eq!(badge.label, "4.0 hours");
}
