// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Daily meditation goal.

use crate::models::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Goal as returned by `GET /goals/goals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeditationGoal {
    /// Target minutes per meditation day
    pub daily_minutes: u32,
    /// Target meditation days per week (1-7)
    pub days_per_week: u8,
    /// When the goal was last changed (ISO 8601 on the wire)
    pub updated_at: DateTime<Utc>,
}

impl MeditationGoal {
    /// Daily target in seconds, for comparing against day totals.
    pub fn daily_seconds(&self) -> u32 {
        self.daily_minutes.saturating_mul(60)
    }
}

/// Goal values the user wants to store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Validate)]
pub struct GoalSettings {
    #[validate(range(min = 1, message = "daily minutes must be at least 1"))]
    pub daily_minutes: u32,
    #[validate(range(min = 1, max = 7, message = "days per week must be between 1 and 7"))]
    pub days_per_week: u8,
}

/// Body of `POST /goals/goals`.
#[derive(Debug, Clone, Serialize)]
pub struct GoalUpdateRequest {
    pub user_id: UserId,
    #[serde(flatten)]
    pub settings: GoalSettings,
}
