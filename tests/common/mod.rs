//! In-memory mock of the backing REST API for integration tests.
#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Default)]
pub struct MockState {
    pub data: Mutex<HashMap<String, Vec<Value>>>,
    pub next_id: AtomicU64,
    /// Writes answer 422 with an error envelope while set.
    pub fail_writes: AtomicBool,
    /// Resources whose GET answers 500 while present.
    pub fail_reads: Mutex<HashSet<String>>,
    /// When set, every list GET answers this exact body.
    pub raw_list_body: Mutex<Option<Value>>,
    /// Wrap list responses in `{data, meta}` instead of a bare array.
    pub envelope: AtomicBool,
}

pub type Mock = Arc<MockState>;

/// Spawn the mock on an ephemeral port. Returns its base URL and a handle
/// for toggling failure modes mid-test.
pub async fn spawn_backend(initial: HashMap<String, Vec<Value>>) -> (String, Mock) {
    let max_id = initial
        .values()
        .flatten()
        .filter_map(|row| row.get("id").and_then(Value::as_u64))
        .max()
        .unwrap_or(0);
    let state: Mock = Arc::new(MockState {
        data: Mutex::new(initial),
        next_id: AtomicU64::new(max_id + 1),
        ..MockState::default()
    });

    let app = Router::new()
        .route("/:res", get(list).post(create))
        .route("/:res/:id", axum::routing::patch(update).delete(remove))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), state)
}

pub fn seed(resources: &[(&str, Value)]) -> HashMap<String, Vec<Value>> {
    resources
        .iter()
        .map(|(name, rows)| {
            (
                name.to_string(),
                rows.as_array().cloned().unwrap_or_default(),
            )
        })
        .collect()
}

fn error_body(message: &str) -> Value {
    json!({"error": {"code": "mock_error", "message": message}})
}

fn id_matches(row: &Value, id_str: &str) -> bool {
    match row.get("id") {
        Some(Value::Number(n)) => n.to_string() == id_str,
        Some(Value::String(s)) => s == id_str,
        _ => false,
    }
}

async fn list(State(state): State<Mock>, Path(res): Path<String>) -> Response {
    if state.fail_reads.lock().unwrap().contains(&res) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(error_body("mock read failure")),
        )
            .into_response();
    }
    if let Some(raw) = state.raw_list_body.lock().unwrap().clone() {
        return Json(raw).into_response();
    }
    let rows = state
        .data
        .lock()
        .unwrap()
        .get(&res)
        .cloned()
        .unwrap_or_default();
    if state.envelope.load(Ordering::SeqCst) {
        let count = rows.len();
        Json(json!({"data": rows, "meta": {"count": count}})).into_response()
    } else {
        Json(Value::Array(rows)).into_response()
    }
}

async fn create(
    State(state): State<Mock>,
    Path(res): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if state.fail_writes.load(Ordering::SeqCst) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(error_body("mock rejects writes")),
        )
            .into_response();
    }
    let mut row = body;
    if row.get("id").is_none() {
        let id = state.next_id.fetch_add(1, Ordering::SeqCst);
        row["id"] = json!(id);
    }
    state
        .data
        .lock()
        .unwrap()
        .entry(res)
        .or_default()
        .push(row.clone());
    (StatusCode::CREATED, Json(json!({"data": row}))).into_response()
}

async fn update(
    State(state): State<Mock>,
    Path((res, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    if state.fail_writes.load(Ordering::SeqCst) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(error_body("mock rejects writes")),
        )
            .into_response();
    }
    let mut data = state.data.lock().unwrap();
    let rows = data.entry(res).or_default();
    let Some(row) = rows.iter_mut().find(|row| id_matches(row, &id)) else {
        return (StatusCode::NOT_FOUND, Json(error_body("no such row"))).into_response();
    };
    if let (Value::Object(target), Value::Object(fields)) = (&mut *row, &body) {
        for (k, v) in fields {
            target.insert(k.clone(), v.clone());
        }
    }
    (StatusCode::OK, Json(json!({"data": row.clone()}))).into_response()
}

async fn remove(State(state): State<Mock>, Path((res, id)): Path<(String, String)>) -> Response {
    let mut data = state.data.lock().unwrap();
    let rows = data.entry(res).or_default();
    let before = rows.len();
    rows.retain(|row| !id_matches(row, &id));
    if rows.len() == before {
        return (StatusCode::NOT_FOUND, Json(error_body("no such row"))).into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}
