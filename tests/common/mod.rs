//! Common test helpers for integration tests.
//!
//! # Note
//!
//! The `#![allow(dead_code)]` attribute is necessary because each
//! integration test file is compiled as a separate crate and uses only part
//! of these helpers.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::{NaiveDate, TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use todo_service::api::{AppState, build_router};
use todo_service::domain::{Priority, Task, TaskDetails, TaskDraft, TaskId, Timestamp};
use todo_service::infrastructure::{InMemoryTaskRepository, ManualClock};
use todo_service::service::TaskService;

// =============================================================================
// AppState Creation Helpers
// =============================================================================

/// Fixed instant every test clock starts at.
pub fn start_time() -> Timestamp {
    Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 7, 1, 9, 0, 0).unwrap())
}

/// A test application wired to an empty in-memory store and a manual clock.
pub struct TestApp {
    pub state: AppState,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::new(start_time()));
        let service = TaskService::new(Arc::new(InMemoryTaskRepository::new()), clock.clone());
        Self {
            state: AppState::new(service),
            clock,
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Sends a request through the router and returns the status and JSON body.
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, body).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }
}

// =============================================================================
// Task Helpers
// =============================================================================

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn details(name: &str, priority: Priority, due_date: Option<NaiveDate>) -> TaskDetails {
    let draft = TaskDraft::new(name, priority);
    let draft = match due_date {
        Some(due_date) => draft.with_due_date(due_date),
        None => draft,
    };
    draft.validate().unwrap()
}

pub fn task(id: u64, name: &str, priority: Priority, due_date: Option<NaiveDate>) -> Task {
    Task::new(TaskId::new(id), details(name, priority, due_date), start_time())
}

/// Extracts the `id` of every task in a page body.
pub fn content_ids(page: &Value) -> Vec<u64> {
    page["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["id"].as_u64().unwrap())
        .collect()
}
