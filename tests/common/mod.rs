// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process mock of the meditation backend.
//!
//! Serves the wire contract on `127.0.0.1:<random port>` and counts every
//! request so tests can assert exactly which calls were made.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use meditrack_client::models::DeviceId;
use meditrack_client::services::{BackendClient, SessionClient};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU16, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// User id the mock assigns to every device.
#[allow(dead_code)]
pub const TEST_USER_ID: i64 = 42;

/// How `POST /users/register` behaves.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterMode {
    Ok,
    ServerError,
    Malformed,
}

/// Shared mock state and request counters.
pub struct MockState {
    pub register_calls: AtomicUsize,
    pub session_calls: AtomicUsize,
    pub goal_get_calls: AtomicUsize,
    pub goal_post_calls: AtomicUsize,
    pub progress_calls: AtomicUsize,
    pub health_calls: AtomicUsize,

    pub register_mode: Mutex<RegisterMode>,
    /// Delay before answering a registration, to widen race windows.
    pub register_delay_ms: AtomicU64,
    /// When set, every non-registration endpoint answers 500.
    pub fail_requests: AtomicBool,
    pub health_status: AtomicU16,
    /// Status used for successful session uploads.
    pub session_status: AtomicU16,

    pub registered_devices: Mutex<Vec<String>>,
    pub session_bodies: Mutex<Vec<Value>>,
    pub goal: Mutex<Option<Value>>,
    pub progress: Mutex<Value>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            register_calls: AtomicUsize::new(0),
            session_calls: AtomicUsize::new(0),
            goal_get_calls: AtomicUsize::new(0),
            goal_post_calls: AtomicUsize::new(0),
            progress_calls: AtomicUsize::new(0),
            health_calls: AtomicUsize::new(0),
            register_mode: Mutex::new(RegisterMode::Ok),
            register_delay_ms: AtomicU64::new(0),
            fail_requests: AtomicBool::new(false),
            health_status: AtomicU16::new(200),
            session_status: AtomicU16::new(201),
            registered_devices: Mutex::new(Vec::new()),
            session_bodies: Mutex::new(Vec::new()),
            goal: Mutex::new(None),
            progress: Mutex::new(json!({
                "daily_goal_seconds": 600,
                "days": [],
                "current_streak": 0,
                "longest_streak": 0
            })),
        }
    }
}

#[allow(dead_code)]
impl MockState {
    pub fn set_register_mode(&self, mode: RegisterMode) {
        *self.register_mode.lock().unwrap() = mode;
    }

    pub fn set_progress(&self, report: Value) {
        *self.progress.lock().unwrap() = report;
    }

    pub fn set_goal(&self, goal: Value) {
        *self.goal.lock().unwrap() = Some(goal);
    }

    /// Requests made to anything other than registration and health.
    pub fn action_calls(&self) -> usize {
        self.session_calls.load(Ordering::SeqCst)
            + self.goal_get_calls.load(Ordering::SeqCst)
            + self.goal_post_calls.load(Ordering::SeqCst)
            + self.progress_calls.load(Ordering::SeqCst)
    }

    pub fn registers(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }
}

/// Running mock backend.
pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<MockState>,
}

#[allow(dead_code)]
impl MockBackend {
    /// Start the mock on a random local port.
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState::default());

        let app = Router::new()
            .route("/api/users/register", post(register))
            .route("/api/meditation/sessions", post(save_session))
            .route("/api/goals/goals", get(get_goal).post(save_goal))
            .route("/api/goals/progress", get(get_progress))
            .route("/api/health", get(health))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Mock backend has no address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock backend crashed");
        });

        Self {
            base_url: format!("http://{}/api", addr),
            state,
        }
    }

    /// A fresh gateway (empty identity cache) pointed at this mock.
    pub fn client(&self) -> SessionClient {
        self.client_for_device("test-device")
    }

    pub fn client_for_device(&self, device_id: &str) -> SessionClient {
        let backend = BackendClient::new(&self.base_url, Duration::from_secs(2))
            .expect("Failed to build backend client");
        SessionClient::new(backend, DeviceId::from(device_id.to_string()))
    }

    /// A fresh gateway with a custom per-request timeout.
    pub fn client_with_timeout(&self, timeout: Duration) -> SessionClient {
        let backend =
            BackendClient::new(&self.base_url, timeout).expect("Failed to build backend client");
        SessionClient::new(backend, DeviceId::from("test-device".to_string()))
    }
}

/// A gateway pointed at a port nothing listens on.
#[allow(dead_code)]
pub fn unreachable_client() -> SessionClient {
    let backend = BackendClient::new("http://127.0.0.1:1/api", Duration::from_secs(1))
        .expect("Failed to build backend client");
    SessionClient::new(backend, DeviceId::from("offline-device".to_string()))
}

// ─── Handlers ────────────────────────────────────────────────

fn server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "Internal server error" })),
    )
        .into_response()
}

fn check_user(params: &HashMap<String, String>) -> Option<Response> {
    match params.get("user_id").map(String::as_str) {
        Some(id) if id == TEST_USER_ID.to_string() => None,
        _ => Some(
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "User not found" })),
            )
                .into_response(),
        ),
    }
}

async fn register(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.register_calls.fetch_add(1, Ordering::SeqCst);

    let delay = state.register_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    if let Some(device_id) = body.get("device_id").and_then(Value::as_str) {
        state
            .registered_devices
            .lock()
            .unwrap()
            .push(device_id.to_string());
    }

    let mode = *state.register_mode.lock().unwrap();
    match mode {
        RegisterMode::Ok => Json(json!({ "user_id": TEST_USER_ID })).into_response(),
        RegisterMode::ServerError => server_error(),
        RegisterMode::Malformed => Json(json!({ "id": "not-a-user" })).into_response(),
    }
}

async fn save_session(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.session_calls.fetch_add(1, Ordering::SeqCst);
    if state.fail_requests.load(Ordering::SeqCst) {
        return server_error();
    }

    state.session_bodies.lock().unwrap().push(body);
    let status = StatusCode::from_u16(state.session_status.load(Ordering::SeqCst))
        .unwrap_or(StatusCode::CREATED);
    (status, Json(json!({ "id": 1 }))).into_response()
}

async fn get_goal(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.goal_get_calls.fetch_add(1, Ordering::SeqCst);
    if state.fail_requests.load(Ordering::SeqCst) {
        return server_error();
    }
    if let Some(rejection) = check_user(&params) {
        return rejection;
    }

    match state.goal.lock().unwrap().clone() {
        Some(goal) => Json(goal).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Goal not found" })),
        )
            .into_response(),
    }
}

async fn save_goal(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.goal_post_calls.fetch_add(1, Ordering::SeqCst);
    if state.fail_requests.load(Ordering::SeqCst) {
        return server_error();
    }

    if body.get("user_id").and_then(Value::as_i64) != Some(TEST_USER_ID) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "user_id is required" })),
        )
            .into_response();
    }

    let goal = json!({
        "daily_minutes": body["daily_minutes"],
        "days_per_week": body["days_per_week"],
        "updated_at": "2025-03-11T08:00:00Z"
    });
    *state.goal.lock().unwrap() = Some(goal.clone());
    Json(goal).into_response()
}

async fn get_progress(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.progress_calls.fetch_add(1, Ordering::SeqCst);
    if state.fail_requests.load(Ordering::SeqCst) {
        return server_error();
    }
    if let Some(rejection) = check_user(&params) {
        return rejection;
    }

    Json(state.progress.lock().unwrap().clone()).into_response()
}

async fn health(State(state): State<Arc<MockState>>) -> Response {
    state.health_calls.fetch_add(1, Ordering::SeqCst);
    let status =
        StatusCode::from_u16(state.health_status.load(Ordering::SeqCst)).unwrap_or(StatusCode::OK);
    (status, "ok").into_response()
}
