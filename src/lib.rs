// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Meditrack client: the gateway a meditation timer uses to talk to its
//! tracking backend.
//!
//! The device registers itself on first use, then saves sessions and reads
//! goals and progress. A small local store keeps the device id and a few
//! warm-start values for rendering before the network answers.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FileStore;
use services::{GoalsStore, LocalCache, ProgressStore, SessionClient};
use std::sync::Arc;

/// Shared application state, built once at startup and handed to callers.
pub struct AppState {
    pub config: Config,
    pub cache: LocalCache,
    pub session_client: SessionClient,
    pub goals: GoalsStore,
    pub progress: ProgressStore,
}

impl AppState {
    /// Open the local store, load the device id and wire up the services.
    pub fn init(config: Config) -> error::Result<Self> {
        let store = Arc::new(FileStore::open(config.store_file())?);
        let device_id = services::device::load_or_create(&*store)?;
        let session_client = SessionClient::from_config(&config, device_id)?;
        Ok(Self::with_parts(config, store, session_client))
    }

    /// Assemble state from explicit parts (tests inject a mock store).
    pub fn with_parts(
        config: Config,
        store: Arc<dyn db::KeyValueStore>,
        session_client: SessionClient,
    ) -> Self {
        let cache = LocalCache::new(store);
        Self {
            goals: GoalsStore::new(session_client.clone(), cache.clone()),
            progress: ProgressStore::new(session_client.clone(), cache.clone()),
            config,
            cache,
            session_client,
        }
    }
}
