//! Weekly progress summary computed from a [`ProgressReport`].
//!
//! Pure and read-only: the same report and "today" always give the same
//! summary, so this is testable without a backend.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::ProgressReport;

/// Days in the trailing window, including today.
pub const WEEK_WINDOW_DAYS: i64 = 7;

/// Aggregates over the trailing seven days ending today.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummary {
    /// First day of the window (today - 6)
    pub start: NaiveDate,
    /// Last day of the window (today)
    pub end: NaiveDate,
    /// Number of sessions recorded in the window
    pub total_sessions: usize,
    /// Sum of whole minutes per day
    pub total_minutes: u32,
    /// Mean of the focus ratings present; `None` if no session was rated
    pub average_focus: Option<f64>,
}

impl WeeklySummary {
    /// Summarize the days of `report` that fall in the window ending `today`.
    pub fn from_report(report: &ProgressReport, today: NaiveDate) -> Self {
        let start = today - Duration::days(WEEK_WINDOW_DAYS - 1);

        let mut total_sessions = 0;
        let mut total_minutes = 0u32;
        let mut rating_sum = 0u32;
        let mut rating_count = 0u32;

        for day in report.days_between(start, today) {
            total_sessions += day.sessions.len();
            total_minutes = total_minutes.saturating_add(day.minutes());

            for rating in day.sessions.iter().filter_map(|s| s.focus_rating) {
                rating_sum += u32::from(rating);
                rating_count += 1;
            }
        }

        let average_focus = if rating_count == 0 {
            None
        } else {
            Some(f64::from(rating_sum) / f64::from(rating_count))
        };

        Self {
            start,
            end: today,
            total_sessions,
            total_minutes,
            average_focus,
        }
    }
}
