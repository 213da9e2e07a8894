// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the meditation backend and local views.

pub mod goal;
pub mod identity;
pub mod progress;
pub mod session;
pub mod sound;
pub mod stats;

pub use goal::{GoalSettings, GoalUpdateRequest, MeditationGoal};
pub use identity::{DeviceId, UserId};
pub use progress::{DayProgress, ProgressReport, SessionSummary};
pub use session::{MeditationSession, NewSession};
pub use sound::{MeditationSound, SOUND_CATALOG};
pub use stats::WeeklySummary;
