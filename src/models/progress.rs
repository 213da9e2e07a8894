// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Server-computed progress report.
//!
//! Decoded values are never mutated; a newer report replaces an older one.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Response of `GET /goals/progress`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Daily goal in seconds at the time the report was computed
    pub daily_goal_seconds: u32,
    /// One entry per calendar day, ordered by date
    pub days: Vec<DayProgress>,
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// Totals for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayProgress {
    /// Calendar day (`YYYY-MM-DD` on the wire); unique within a report
    pub date: NaiveDate,
    /// Sum of the day's session durations
    pub total_seconds: u32,
    pub goal_completed: bool,
    pub sessions: Vec<SessionSummary>,
}

/// One recorded session inside a [`DayProgress`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: i64,
    /// Wire name: `duration`
    #[serde(rename = "duration")]
    pub duration_seconds: u32,
    #[serde(default)]
    pub focus_rating: Option<u8>,
}

impl DayProgress {
    /// Whole minutes meditated on this day.
    pub fn minutes(&self) -> u32 {
        self.total_seconds / 60
    }
}

impl ProgressReport {
    /// Look up the entry for a calendar day.
    pub fn day(&self, date: NaiveDate) -> Option<&DayProgress> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Whole minutes meditated on `today`, zero if the day has no entry.
    pub fn minutes_on(&self, today: NaiveDate) -> u32 {
        self.day(today).map(DayProgress::minutes).unwrap_or(0)
    }

    /// Days whose date falls in `start..=end`.
    pub fn days_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = &DayProgress> {
        self.days
            .iter()
            .filter(move |d| d.date >= start && d.date <= end)
    }
}
