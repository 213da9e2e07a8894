// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meditation backend client.
//!
//! Handles:
//! - Device registration (device id -> user id)
//! - Session upload
//! - Goal read/write
//! - Progress report retrieval
//! - Health probe

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::models::{
    DeviceId, GoalSettings, GoalUpdateRequest, MeditationGoal, MeditationSession, NewSession,
    ProgressReport, UserId,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::Mutex;
use validator::Validate;

/// Low-level HTTP client for the backend wire contract.
///
/// Knows nothing about identity caching; every call takes explicit ids.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange a device id for the server's user id.
    ///
    /// POST {base}/users/register  `{"device_id": ...}` -> `{"user_id": N}`
    pub async fn register_device(&self, device_id: &DeviceId) -> Result<UserId> {
        let body = RegisterRequest {
            device_id: device_id.as_str(),
        };
        let response: RegisterResponse = self.post_json("/users/register", &body).await?;
        Ok(response.user_id)
    }

    /// Upload a completed session. The response body is ignored.
    pub async fn save_session(&self, session: &MeditationSession) -> Result<()> {
        let response = self
            .http
            .post(self.url("/meditation/sessions"))
            .json(session)
            .send()
            .await?;

        self.check_response(response).await
    }

    /// Get the goal for a user.
    pub async fn get_goal(&self, user_id: UserId) -> Result<MeditationGoal> {
        self.get_json("/goals/goals", user_id).await
    }

    /// Create or replace the goal for a user.
    pub async fn save_goal(&self, request: &GoalUpdateRequest) -> Result<()> {
        let response = self
            .http
            .post(self.url("/goals/goals"))
            .json(request)
            .send()
            .await?;

        self.check_response(response).await
    }

    /// Get the progress report for a user.
    pub async fn get_progress(&self, user_id: UserId) -> Result<ProgressReport> {
        self.get_json("/goals/progress", user_id).await
    }

    /// Probe `GET /health`. Reachable means exactly HTTP 200.
    pub async fn health(&self) -> bool {
        match self.http.get(self.url("/health")).send().await {
            Ok(response) => response.status() == reqwest::StatusCode::OK,
            Err(e) => {
                tracing::debug!(error = %e, "Health probe failed");
                false
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Generic GET request scoped to a user, with JSON response.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, user_id: UserId) -> Result<T> {
        let response = self
            .http
            .get(self.url(path))
            .query(&[("user_id", user_id.0)])
            .send()
            .await?;

        self.check_response_json(response).await
    }

    /// Generic POST request with JSON body and JSON response.
    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        self.check_response_json(response).await
    }

    /// Check response status and return error if not successful.
    async fn check_response(&self, response: reqwest::Response) -> Result<()> {
        if response.status().is_success() {
            return Ok(());
        }
        Err(Self::status_error(response).await)
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Build a transport error from a non-2xx response, keeping the server's
    /// `message` when the body carries one.
    async fn status_error(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or(body);

        tracing::debug!(status = %status, detail = %detail, "Backend returned error status");
        ClientError::Transport(format!("HTTP {}: {}", status.as_u16(), detail))
    }
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    device_id: &'a str,
}

#[derive(Deserialize)]
struct RegisterResponse {
    user_id: UserId,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// SessionClient - gateway with identity bootstrap
// ─────────────────────────────────────────────────────────────────────────────

/// Shared identity cell. Written once per successful bootstrap.
pub type IdentityCell = Arc<RwLock<Option<UserId>>>;

/// Gateway used by the app: resolves the user identity on demand and runs
/// every substantive call as bootstrap-then-act.
///
/// Clones share the identity cache and the bootstrap lock.
#[derive(Clone)]
pub struct SessionClient {
    backend: BackendClient,
    device_id: DeviceId,
    /// In-memory user id; never persisted.
    identity: IdentityCell,
    /// Serializes bootstraps so a burst of first calls registers once.
    /// Holds the error of the most recent failed attempt.
    bootstrap_lock: Arc<Mutex<Option<ClientError>>>,
    /// Count of failed bootstrap attempts.
    failed_attempts: Arc<AtomicU64>,
}

impl SessionClient {
    pub fn new(backend: BackendClient, device_id: DeviceId) -> Self {
        Self {
            backend,
            device_id,
            identity: Arc::new(RwLock::new(None)),
            bootstrap_lock: Arc::new(Mutex::new(None)),
            failed_attempts: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Build the backend client from config.
    pub fn from_config(config: &Config, device_id: DeviceId) -> Result<Self> {
        let backend = BackendClient::new(config.base_url.clone(), config.request_timeout)?;
        Ok(Self::new(backend, device_id))
    }

    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    /// The user id resolved so far in this process, if any.
    pub fn cached_identity(&self) -> Option<UserId> {
        *self.identity.read().unwrap_or_else(PoisonError::into_inner)
    }

    // ─── Identity ────────────────────────────────────────────────────────────

    /// Resolve the user id for this device.
    ///
    /// Served from memory when already known. Otherwise one registration
    /// request is made and every caller queued behind it shares its outcome.
    /// A failure is not cached: calls arriving after it start over.
    pub async fn resolve_identity(&self) -> Result<UserId> {
        if let Some(user_id) = self.cached_identity() {
            return Ok(user_id);
        }

        let seen_failures = self.failed_attempts.load(Ordering::Acquire);
        let mut last_failure = self.bootstrap_lock.lock().await;

        // Another task may have registered while we waited.
        if let Some(user_id) = self.cached_identity() {
            return Ok(user_id);
        }

        // An attempt failed while we were queued behind it.
        if self.failed_attempts.load(Ordering::Acquire) != seen_failures {
            if let Some(error) = last_failure.as_ref() {
                return Err(error.clone());
            }
        }

        match self.backend.register_device(&self.device_id).await {
            Ok(user_id) => {
                *self.identity.write().unwrap_or_else(PoisonError::into_inner) = Some(user_id);
                *last_failure = None;
                tracing::info!(user_id = user_id.0, "Device registered");
                Ok(user_id)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Device registration failed");
                let error = ClientError::identity(e);
                *last_failure = Some(error.clone());
                self.failed_attempts.fetch_add(1, Ordering::Release);
                Err(error)
            }
        }
    }

    /// Register silently at startup; the outcome is only logged.
    pub async fn prewarm(&self) {
        match self.resolve_identity().await {
            Ok(user_id) => tracing::info!(user_id = user_id.0, "Silently registered"),
            Err(e) => tracing::info!(error = %e, "Silent registration failed"),
        }
    }

    // ─── API Wrappers ────────────────────────────────────────────────────────

    /// Save a completed session, reporting only whether it was stored.
    ///
    /// Failures are logged; use [`Self::try_save_session`] for the error.
    pub async fn save_session(&self, session: NewSession) -> bool {
        match self.try_save_session(session).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save meditation session");
                false
            }
        }
    }

    /// Save a completed session.
    pub async fn try_save_session(&self, session: NewSession) -> Result<()> {
        session.validate()?;
        let user_id = self.resolve_identity().await?;

        let payload = session.into_session(user_id);
        self.backend.save_session(&payload).await?;

        tracing::debug!(
            user_id = user_id.0,
            duration = payload.duration_seconds,
            "Meditation session saved"
        );
        Ok(())
    }

    /// Fetch the current goal.
    pub async fn get_goal(&self) -> Result<MeditationGoal> {
        let user_id = self.resolve_identity().await?;
        self.backend.get_goal(user_id).await
    }

    /// Store a new goal. Out-of-range values are rejected before any request.
    pub async fn save_goal(&self, settings: GoalSettings) -> Result<()> {
        settings.validate()?;
        let user_id = self.resolve_identity().await?;

        self.backend
            .save_goal(&GoalUpdateRequest { user_id, settings })
            .await?;

        tracing::info!(
            user_id = user_id.0,
            daily_minutes = settings.daily_minutes,
            days_per_week = settings.days_per_week,
            "Goal saved"
        );
        Ok(())
    }

    /// Fetch the progress report.
    pub async fn get_progress(&self) -> Result<ProgressReport> {
        let user_id = self.resolve_identity().await?;
        self.backend.get_progress(user_id).await
    }

    /// Pre-flight reachability check. Needs no identity.
    pub async fn check_connectivity(&self) -> bool {
        self.backend.health().await
    }
}
