use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use super::{ApiError, Transport};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// In-memory stand-in for the HTTP transport: records every request and
/// replays queued responses in order. Anything past the queue answers
/// `Ok(None)`, which decodes as an empty success.
#[derive(Default)]
pub struct FakeTransport {
    requests: Mutex<Vec<RecordedRequest>>,
    responses: Mutex<VecDeque<Result<Option<Value>, ApiError>>>,
}

impl FakeTransport {
    pub fn new() -> FakeTransport {
        FakeTransport::default()
    }

    pub fn respond(self, response: Result<Option<Value>, ApiError>) -> FakeTransport {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn queue(&self, response: Result<Option<Value>, ApiError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Option<Value>, ApiError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path: path.to_owned(),
            body,
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(None))
    }
}
