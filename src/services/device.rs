// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable device identity.

use crate::db::{keys, KeyValueStore};
use crate::error::Result;
use crate::models::DeviceId;
use serde_json::Value;

/// Load the installation's device id, generating and persisting it on first use.
///
/// A stored value that is not a non-empty string is treated as absent.
pub fn load_or_create(store: &dyn KeyValueStore) -> Result<DeviceId> {
    if let Some(Value::String(existing)) = store.get(keys::DEVICE_ID) {
        if !existing.is_empty() {
            return Ok(DeviceId::from(existing));
        }
    }

    let device_id = DeviceId::generate();
    store.set(keys::DEVICE_ID, Value::String(device_id.to_string()))?;
    tracing::info!(device_id = %device_id, "Generated new device id");
    Ok(device_id)
}
