// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON-file backed key/value store.
//!
//! Entries live in memory and the whole map is rewritten on every change
//! (temp file + rename, so a crash never leaves a half-written file).

use crate::db::KeyValueStore;
use crate::error::{ClientError, Result};
use dashmap::DashMap;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Durable local store.
pub struct FileStore {
    /// Backing file; `None` for the in-memory mock
    path: Option<PathBuf>,
    entries: DashMap<String, Value>,
    /// Serializes snapshot-and-write so writes land in order.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open the store at `path`, loading existing entries.
    ///
    /// A missing file is an empty store. A corrupt file is logged and
    /// replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = DashMap::new();

        if path.exists() {
            let raw = fs_err::read_to_string(&path)
                .map_err(|e| ClientError::Storage(e.to_string()))?;

            match serde_json::from_str::<Map<String, Value>>(&raw) {
                Ok(map) => {
                    for (key, value) in map {
                        entries.insert(key, value);
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Local store is corrupt, starting empty"
                    );
                }
            }
        }

        tracing::debug!(path = %path.display(), entries = entries.len(), "Local store opened");

        Ok(Self {
            path: Some(path),
            entries,
            write_lock: Mutex::new(()),
        })
    }

    /// Create an in-memory store for testing (nothing touches disk).
    pub fn new_mock() -> Self {
        Self {
            path: None,
            entries: DashMap::new(),
            write_lock: Mutex::new(()),
        }
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| ClientError::Storage("Store write lock poisoned".to_string()))?;

        let snapshot: Map<String, Value> = self
            .entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        let body = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| ClientError::Storage(e.to_string()))?;

        if let Some(parent) = path.parent() {
            fs_err::create_dir_all(parent).map_err(|e| ClientError::Storage(e.to_string()))?;
        }

        let tmp = path.with_extension("json.tmp");
        fs_err::write(&tmp, body).map_err(|e| ClientError::Storage(e.to_string()))?;
        fs_err::rename(&tmp, path).map_err(|e| ClientError::Storage(e.to_string()))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let previous = self.entries.insert(key.to_string(), value);
        if let Err(e) = self.persist() {
            // Keep memory in step with what is on disk.
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key).map(|(_, v)| v),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}
