//! Shared test doubles for store integration tests.

// Each test binary compiles its own copy and uses a different subset.
#![allow(dead_code)]

use async_trait::async_trait;
use formpulse_core::{ApiError, ApiResult, ApiTransport, HttpMethod};
use formpulse_core::{RepoResult, SessionRepository};
use serde_json::Value;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

/// One request observed by the fake transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
}

enum Scripted {
    Ok(Value),
    Status(u16),
}

/// Scripted transport standing in for the survey backend.
///
/// Clones share the same script and call log, so a test can keep a handle
/// while the store owns another.
#[derive(Clone, Default)]
pub struct FakeApi {
    responses: Arc<Mutex<VecDeque<Scripted>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one successful JSON response.
    pub fn ok(self, body: Value) -> Self {
        self.responses.lock().unwrap().push_back(Scripted::Ok(body));
        self
    }

    /// Queues one non-2xx response.
    pub fn fail(self, status: u16) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Scripted::Status(status));
        self
    }

    /// Every request the store issued, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiTransport for FakeApi {
    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> ApiResult<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });

        match self.responses.lock().unwrap().pop_front() {
            Some(Scripted::Ok(value)) => Ok(value),
            Some(Scripted::Status(status)) => Err(ApiError::Status {
                status,
                body: "scripted failure".to_string(),
            }),
            None => panic!(
                "FakeApi ran out of scripted responses for {} {path}",
                method.as_str()
            ),
        }
    }
}

/// In-memory session repository with shared, inspectable contents.
#[derive(Clone, Default)]
pub struct MemorySession {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one persisted key, as if written by an earlier process run.
    pub fn seed(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn entries(&self) -> BTreeMap<String, String> {
        self.entries.lock().unwrap().clone()
    }
}

impl SessionRepository for MemorySession {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self) -> RepoResult<()> {
        self.entries.lock().unwrap().clear();
        Ok(())
    }
}
