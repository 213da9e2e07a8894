// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Goal accessor for presentation code.
//!
//! Wraps [`SessionClient`] goal calls and keeps the cached daily-minutes
//! scalar current after each success.

use crate::error::{ClientError, Result};
use crate::models::{GoalSettings, MeditationGoal};
use crate::services::{LocalCache, SessionClient};

/// What the goal screen can show.
#[derive(Debug)]
pub enum GoalView {
    /// Fresh from the backend.
    Live(MeditationGoal),
    /// Fetch failed; showing the last-known daily minutes.
    Cached {
        daily_minutes: u32,
        error: ClientError,
    },
    /// Fetch failed and nothing is cached.
    Unavailable(ClientError),
}

#[derive(Clone)]
pub struct GoalsStore {
    client: SessionClient,
    cache: LocalCache,
}

impl GoalsStore {
    pub fn new(client: SessionClient, cache: LocalCache) -> Self {
        Self { client, cache }
    }

    /// Last-known daily minutes, for rendering before the network answers.
    pub fn cached_daily_minutes(&self) -> Option<u32> {
        self.cache.daily_goal_minutes()
    }

    /// Fetch the goal and refresh the cache.
    pub async fn fetch(&self) -> Result<MeditationGoal> {
        let goal = self.client.get_goal().await?;
        self.cache.set_daily_goal_minutes(goal.daily_minutes);
        Ok(goal)
    }

    /// Fetch the goal, falling back to the cached minutes on failure.
    pub async fn load(&self) -> GoalView {
        match self.fetch().await {
            Ok(goal) => GoalView::Live(goal),
            Err(error) => match self.cached_daily_minutes() {
                Some(daily_minutes) => {
                    tracing::warn!(
                        error = %error,
                        daily_minutes,
                        "Goal fetch failed, using cached value"
                    );
                    GoalView::Cached {
                        daily_minutes,
                        error,
                    }
                }
                None => GoalView::Unavailable(error),
            },
        }
    }

    /// Save a new goal and cache its daily minutes.
    pub async fn update(&self, settings: GoalSettings) -> Result<()> {
        self.client.save_goal(settings).await?;
        self.cache.set_daily_goal_minutes(settings.daily_minutes);
        Ok(())
    }
}
