// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - gateway and presentation-facing stores.

pub mod backend;
pub mod cache;
pub mod device;
pub mod goals;
pub mod progress;

pub use backend::{BackendClient, SessionClient};
pub use cache::LocalCache;
pub use goals::{GoalView, GoalsStore};
pub use progress::{ProgressStore, ProgressView};
