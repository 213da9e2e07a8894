//! Durable local key/value store.
//!
//! Holds the device identifier and the best-effort warm-start scalars. Never
//! the source of truth for goals or progress.

pub mod file_store;

pub use file_store::FileStore;

use crate::error::Result;
use serde_json::Value;

/// Key names as constants.
pub mod keys {
    pub const DEVICE_ID: &str = "device_id";
    pub const DAILY_GOAL_MINUTES: &str = "daily_goal_minutes";
    /// Prefix for per-day minutes; full key is `minutes_meditated:YYYY-MM-DD`
    pub const MINUTES_MEDITATED_PREFIX: &str = "minutes_meditated:";
    pub const SELECTED_SOUND_INDEX: &str = "selected_sound_index";
}

/// String-keyed store of JSON values.
///
/// Implementations must be safe to share between tasks.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;

    fn set(&self, key: &str, value: Value) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}
