// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed warm-start cache over the local store.
//!
//! Reads never fail: a missing or malformed entry is just `None`. Writes are
//! best-effort and only logged on failure.

use crate::db::{keys, KeyValueStore};
use crate::models::sound::{sound_at, MeditationSound, SOUND_CATALOG};
use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;

/// Last-known scalars for rendering before the network answers.
#[derive(Clone)]
pub struct LocalCache {
    store: Arc<dyn KeyValueStore>,
}

impl LocalCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Last-known daily goal in minutes.
    pub fn daily_goal_minutes(&self) -> Option<u32> {
        self.read_u32(keys::DAILY_GOAL_MINUTES)
    }

    pub fn set_daily_goal_minutes(&self, minutes: u32) {
        self.write(keys::DAILY_GOAL_MINUTES, Value::from(minutes));
    }

    /// Minutes already recorded on `date`.
    pub fn minutes_meditated(&self, date: NaiveDate) -> Option<u32> {
        self.read_u32(&minutes_key(date))
    }

    pub fn set_minutes_meditated(&self, date: NaiveDate, minutes: u32) {
        self.write(&minutes_key(date), Value::from(minutes));
    }

    /// Currently selected ambient sound. Out-of-range indexes reset to the default.
    pub fn selected_sound(&self) -> &'static MeditationSound {
        let index = self
            .store
            .get(keys::SELECTED_SOUND_INDEX)
            .and_then(|v| v.as_u64())
            .unwrap_or(0);

        if index as usize >= SOUND_CATALOG.len() {
            self.write(keys::SELECTED_SOUND_INDEX, Value::from(0u64));
            return sound_at(0);
        }
        sound_at(index as usize)
    }

    /// Persist the sound selection. Returns `false` for an unknown index.
    pub fn select_sound(&self, index: usize) -> bool {
        if index >= SOUND_CATALOG.len() {
            return false;
        }
        self.write(keys::SELECTED_SOUND_INDEX, Value::from(index as u64));
        true
    }

    fn read_u32(&self, key: &str) -> Option<u32> {
        self.store
            .get(key)
            .and_then(|v| v.as_u64())
            .and_then(|n| u32::try_from(n).ok())
    }

    fn write(&self, key: &str, value: Value) {
        if let Err(e) = self.store.set(key, value) {
            tracing::warn!(key, error = %e, "Failed to update local cache");
        }
    }
}

fn minutes_key(date: NaiveDate) -> String {
    format!(
        "{}{}",
        keys::MINUTES_MEDITATED_PREFIX,
        date.format("%Y-%m-%d")
    )
}
