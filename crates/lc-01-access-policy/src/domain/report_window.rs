//! Report edit window.
//!
//! A submitted report stays editable for a fixed time after submission. The
//! window depends on who is editing and is never renewed.
//!
//! Branches are evaluated in this exact order, first match wins:
//!
//! ```text
//! role == club && uid == event.clubid  ──→ elapsed < 2 days
//! role == cc                           ──→ elapsed < 2 days
//! role == slo                          ──→ elapsed < 14 days
//! anything else                        ──→ false
//! ```
//!
//! A club account that does not own the event falls through every branch,
//! collaborating clubs included.

use chrono::{DateTime, Utc};
use shared_types::{parse_instant, Event, EventReport, Role, Viewer};

/// Edit window for the owning club and the Clubs Council (2 days).
pub const REPORT_EDIT_WINDOW_MS: i64 = 2 * 24 * 60 * 60 * 1000;

/// Edit window for the Student Life Office (14 days).
pub const REPORT_EDIT_WINDOW_SLO_MS: i64 = 14 * 24 * 60 * 60 * 1000;

/// Decide whether `viewer` may currently modify `report`, using the wall clock.
pub fn can_edit_report(event: &Event, report: Option<&EventReport>, viewer: &Viewer) -> bool {
    can_edit_report_at(event, report, viewer, Utc::now())
}

/// Same as [`can_edit_report`] with an explicit `now`.
///
/// Returns `false` when the report or its submission time is absent, when the
/// viewer has no role, or when the submission time does not parse. Elapsed
/// time below zero (submission in the future) counts as inside the window.
pub fn can_edit_report_at(
    event: &Event,
    report: Option<&EventReport>,
    viewer: &Viewer,
    now: DateTime<Utc>,
) -> bool {
    let Some(raw) = report.and_then(|r| r.submitted_time.as_deref()) else {
        return false;
    };
    if raw.is_empty() {
        return false;
    }
    let Some(role) = viewer.role else {
        return false;
    };

    // Unparseable instants compare as NaN would: never inside a window.
    let elapsed_ms = parse_instant(raw).map(|submitted| elapsed_millis(submitted, now));

    if role == Role::Club && viewer.is(&event.clubid) {
        return within(elapsed_ms, REPORT_EDIT_WINDOW_MS);
    }

    if role == Role::Cc {
        return within(elapsed_ms, REPORT_EDIT_WINDOW_MS);
    }

    if role == Role::Slo {
        return within(elapsed_ms, REPORT_EDIT_WINDOW_SLO_MS);
    }

    false
}

/// Remaining edit time in milliseconds, or `None` when no branch applies.
///
/// Used to tell the viewer how long the edit link stays live.
pub fn remaining_edit_millis(
    event: &Event,
    report: Option<&EventReport>,
    viewer: &Viewer,
    now: DateTime<Utc>,
) -> Option<i64> {
    if !can_edit_report_at(event, report, viewer, now) {
        return None;
    }
    let submitted = report
        .and_then(|r| r.submitted_time.as_deref())
        .and_then(parse_instant)?;
    let window = match viewer.role {
        Some(Role::Slo) => REPORT_EDIT_WINDOW_SLO_MS,
        _ => REPORT_EDIT_WINDOW_MS,
    };
    Some(window - elapsed_millis(submitted, now))
}

fn elapsed_millis(submitted: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    now.timestamp_millis() - submitted.timestamp_millis()
}

fn within(elapsed_ms: Option<i64>, window_ms: i64) -> bool {
    matches!(elapsed_ms, Some(elapsed) if elapsed < window_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;
    use shared_types::EventState;

    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    fn now() -> DateTime<Utc> {
        parse_instant("2024-06-15T12:00:00.000Z").unwrap()
    }

    fn event(clubid: &str) -> Event {
        Event::new("ev1", clubid, EventState::Approved)
    }

    fn report_at(submitted: DateTime<Utc>) -> EventReport {
        EventReport::submitted("ev1", submitted.to_rfc3339())
    }

    fn ago(ms: i64) -> EventReport {
        report_at(now() - Duration::milliseconds(ms))
    }

    #[test]
    fn test_absent_report_denies_every_role() {
        let ev = event("drama.club");
        for role in Role::KNOWN {
            let viewer = Viewer::new("drama.club", role);
            assert!(!can_edit_report_at(&ev, None, &viewer, now()));
        }
    }

    #[test]
    fn test_absent_submitted_time_denies() {
        let ev = event("drama.club");
        let report = EventReport {
            eventid: "ev1".into(),
            ..EventReport::default()
        };
        assert!(!can_edit_report_at(&ev, Some(&report), &Viewer::new("x", Role::Cc), now()));

        let empty = EventReport::submitted("ev1", "");
        assert!(!can_edit_report_at(&ev, Some(&empty), &Viewer::new("x", Role::Cc), now()));
    }

    #[test]
    fn test_absent_role_denies() {
        let ev = event("drama.club");
        let viewer = Viewer {
            uid: Some("drama.club".into()),
            role: None,
        };
        assert!(!can_edit_report_at(&ev, Some(&ago(1000)), &viewer, now()));
        assert!(!can_edit_report_at(&ev, Some(&ago(1000)), &Viewer::anonymous(), now()));
    }

    #[test]
    fn test_owning_club_two_day_window() {
        let ev = event("drama.club");
        let owner = Viewer::new("drama.club", Role::Club);

        assert!(can_edit_report_at(&ev, Some(&ago(60 * 60 * 1000)), &owner, now()));
        assert!(can_edit_report_at(&ev, Some(&ago(REPORT_EDIT_WINDOW_MS - 1)), &owner, now()));
        assert!(!can_edit_report_at(&ev, Some(&ago(REPORT_EDIT_WINDOW_MS)), &owner, now()));
        assert!(!can_edit_report_at(&ev, Some(&ago(3 * DAY_MS)), &owner, now()));
    }

    #[test]
    fn test_non_owning_club_falls_through() {
        let ev = event("music.club");
        let other = Viewer::new("drama.club", Role::Club);
        assert!(!can_edit_report_at(&ev, Some(&ago(60 * 60 * 1000)), &other, now()));

        let mut collab = event("music.club");
        collab.collabclubs.push("drama.club".into());
        assert!(!can_edit_report_at(&collab, Some(&ago(60 * 60 * 1000)), &other, now()));
    }

    #[test]
    fn test_cc_window_independent_of_uid() {
        let ev = event("drama.club");
        let cc = Viewer::new("clubs@iiit.ac.in", Role::Cc);
        assert!(can_edit_report_at(&ev, Some(&ago(DAY_MS)), &cc, now()));
        assert!(!can_edit_report_at(&ev, Some(&ago(3 * DAY_MS)), &cc, now()));
        assert!(!can_edit_report_at(&ev, Some(&ago(REPORT_EDIT_WINDOW_MS)), &cc, now()));
    }

    #[test]
    fn test_slo_fourteen_day_window() {
        let ev = event("drama.club");
        let slo = Viewer::new("slo@iiit.ac.in", Role::Slo);
        assert!(can_edit_report_at(&ev, Some(&ago(10 * DAY_MS)), &slo, now()));
        assert!(can_edit_report_at(&ev, Some(&ago(REPORT_EDIT_WINDOW_SLO_MS - 1)), &slo, now()));
        assert!(!can_edit_report_at(&ev, Some(&ago(REPORT_EDIT_WINDOW_SLO_MS)), &slo, now()));
        assert!(!can_edit_report_at(&ev, Some(&ago(20 * DAY_MS)), &slo, now()));
    }

    #[test]
    fn test_other_roles_never_edit() {
        let ev = event("drama.club");
        for role in [Role::Slc, Role::Public, Role::Unknown] {
            let viewer = Viewer::new("drama.club", role);
            assert!(!can_edit_report_at(&ev, Some(&ago(1000)), &viewer, now()));
        }
    }

    #[test]
    fn test_invalid_date_denies_every_role() {
        let ev = event("drama.club");
        let report = EventReport::submitted("ev1", "not-a-date");
        for role in Role::KNOWN {
            let viewer = Viewer::new("drama.club", role);
            assert!(!can_edit_report_at(&ev, Some(&report), &viewer, now()));
        }
    }

    #[test]
    fn test_future_submission_counts_as_inside() {
        let ev = event("drama.club");
        let report = report_at(now() + Duration::days(30));
        assert!(can_edit_report_at(&ev, Some(&report), &Viewer::new("cc", Role::Cc), now()));
    }

    #[test]
    fn test_browser_iso_format() {
        let ev = event("drama.club");
        let report = EventReport::submitted("ev1", "2024-06-14T12:00:00.000Z");
        assert!(can_edit_report_at(&ev, Some(&report), &Viewer::new("cc", Role::Cc), now()));
    }

    #[test]
    fn test_remaining_edit_millis() {
        let ev = event("drama.club");
        let cc = Viewer::new("cc", Role::Cc);
        assert_eq!(
            remaining_edit_millis(&ev, Some(&ago(DAY_MS)), &cc, now()),
            Some(DAY_MS)
        );
        let slo = Viewer::new("slo", Role::Slo);
        assert_eq!(
            remaining_edit_millis(&ev, Some(&ago(DAY_MS)), &slo, now()),
            Some(13 * DAY_MS)
        );
        assert_eq!(
            remaining_edit_millis(&ev, Some(&ago(3 * DAY_MS)), &cc, now()),
            None
        );
    }

    #[test]
    fn test_wall_clock_windows() {
        let ev = event("drama.club");
        let cc = Viewer::new("cc", Role::Cc);
        let slo = Viewer::new("slo", Role::Slo);
        let owner = Viewer::new("drama.club", Role::Club);

        let hour_ago = report_at(Utc::now() - Duration::hours(1));
        let days_ago = report_at(Utc::now() - Duration::days(3));
        let ten_days_ago = report_at(Utc::now() - Duration::days(10));

        assert!(can_edit_report(&ev, Some(&hour_ago), &cc));
        assert!(can_edit_report(&ev, Some(&hour_ago), &owner));
        assert!(!can_edit_report(&ev, Some(&days_ago), &cc));
        assert!(!can_edit_report(&ev, Some(&days_ago), &owner));
        assert!(can_edit_report(&ev, Some(&ten_days_ago), &slo));
        assert!(!can_edit_report(&ev, None, &cc));
        assert!(!can_edit_report(&ev, None, &slo));
    }

    proptest! {
        #[test]
        fn prop_cc_boundary(elapsed in 0i64..(30 * DAY_MS)) {
            let ev = event("drama.club");
            let cc = Viewer::new("cc", Role::Cc);
            let allowed = can_edit_report_at(&ev, Some(&ago(elapsed)), &cc, now());
            prop_assert_eq!(allowed, elapsed < REPORT_EDIT_WINDOW_MS);
        }

        #[test]
        fn prop_slo_boundary(elapsed in 0i64..(30 * DAY_MS)) {
            let ev = event("drama.club");
            let slo = Viewer::new("slo", Role::Slo);
            let allowed = can_edit_report_at(&ev, Some(&ago(elapsed)), &slo, now());
            prop_assert_eq!(allowed, elapsed < REPORT_EDIT_WINDOW_SLO_MS);
        }
    }
}
