//! The seam between resource commands and the HTTP transport

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::request::ApiRequest;

/// Executes one authenticated request and returns the decoded JSON body.
///
/// `Ok(None)` means the server answered with a success status and no body
/// (e.g., `204 No Content` on delete). Non-success statuses are errors.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self, request: &ApiRequest) -> Result<Option<Value>>;
}

/// In-memory executor that records every request and replays canned responses.
///
/// Used by tests; responses are consumed in order and an
/// exhausted queue answers with an empty body.
#[derive(Default)]
pub struct RecordingExecutor {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<Result<Option<Value>, String>>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response body
    pub fn respond_with(self, body: Value) -> Self {
        self.push(Ok(Some(body)));
        self
    }

    /// Queue a successful response without body
    pub fn respond_empty(self) -> Self {
        self.push(Ok(None));
        self
    }

    /// Queue a failure, surfaced as the executor's error
    pub fn fail_with(self, message: impl Into<String>) -> Self {
        self.push(Err(message.into()));
        self
    }

    /// All requests executed so far, in order
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn push(&self, response: Result<Option<Value>, String>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(response);
        }
    }
}

#[async_trait]
impl RequestExecutor for RecordingExecutor {
    async fn execute(&self, request: &ApiRequest) -> Result<Option<Value>> {
        self.requests
            .lock()
            .map_err(|_| anyhow::anyhow!("Request log poisoned"))?
            .push(request.clone());

        let next = self
            .responses
            .lock()
            .map_err(|_| anyhow::anyhow!("Response queue poisoned"))?
            .pop_front();

        match next {
            Some(Ok(body)) => Ok(body),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn replays_responses_in_order() {
        let executor = RecordingExecutor::new()
            .respond_with(json!({"routes": []}))
            .fail_with("409 Conflict");

        let first = executor.execute(&ApiRequest::get("/routes")).await.unwrap();
        assert_eq!(first, Some(json!({"routes": []})));

        let second = executor.execute(&ApiRequest::delete("/routes/1")).await;
        assert_eq!(second.unwrap_err().to_string(), "409 Conflict");

        let third = executor.execute(&ApiRequest::get("/routes")).await.unwrap();
        assert_eq!(third, None);

        assert_eq!(executor.requests().len(), 3);
    }
}
