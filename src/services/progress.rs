// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progress accessor for presentation code.

use crate::error::{ClientError, Result};
use crate::models::{ProgressReport, WeeklySummary};
use crate::services::{LocalCache, SessionClient};
use chrono::NaiveDate;

/// What the progress screen can show.
#[derive(Debug)]
pub enum ProgressView {
    /// Fresh from the backend.
    Live(ProgressReport),
    /// Fetch failed; showing cached scalars (either may be missing).
    Cached {
        today_minutes: Option<u32>,
        daily_goal_minutes: Option<u32>,
        error: ClientError,
    },
}

#[derive(Clone)]
pub struct ProgressStore {
    client: SessionClient,
    cache: LocalCache,
}

impl ProgressStore {
    pub fn new(client: SessionClient, cache: LocalCache) -> Self {
        Self { client, cache }
    }

    /// Cached minutes for `today`, for an optimistic progress ring.
    pub fn cached_today_minutes(&self, today: NaiveDate) -> Option<u32> {
        self.cache.minutes_meditated(today)
    }

    /// Fetch the report and refresh today's minutes and the goal minutes.
    pub async fn fetch(&self, today: NaiveDate) -> Result<ProgressReport> {
        let report = self.client.get_progress().await?;

        self.cache
            .set_minutes_meditated(today, report.minutes_on(today));
        self.cache
            .set_daily_goal_minutes(report.daily_goal_seconds / 60);

        Ok(report)
    }

    /// Fetch the report, falling back to cached scalars on failure.
    pub async fn load(&self, today: NaiveDate) -> ProgressView {
        match self.fetch(today).await {
            Ok(report) => ProgressView::Live(report),
            Err(error) => {
                tracing::warn!(error = %error, "Progress fetch failed, using cached values");
                ProgressView::Cached {
                    today_minutes: self.cache.minutes_meditated(today),
                    daily_goal_minutes: self.cache.daily_goal_minutes(),
                    error,
                }
            }
        }
    }

    /// Fetch the report and summarize the trailing week ending `today`.
    pub async fn weekly_summary(&self, today: NaiveDate) -> Result<WeeklySummary> {
        let report = self.fetch(today).await?;
        Ok(WeeklySummary::from_report(&report, today))
    }
}
