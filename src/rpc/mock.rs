//! rpc::mock
//!
//! Mock transport for deterministic testing.
//!
//! # Design
//!
//! Responses are configured per method. Each method holds a queue: calls pop
//! from the front until one response is left, which then answers every later
//! call. Every request is recorded for verification. Unknown methods fail
//! the way the daemon does (HTTP 404, "Method not found").
//!
//! # Example
//!
//! ```
//! use sbtc::rpc::mock::MockTransport;
//! use sbtc::rpc::{RpcRequest, RpcTransport};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let transport = MockTransport::new();
//! transport.respond("getblockcount", json!(420000));
//!
//! let count = transport
//!     .call(&RpcRequest::new("getblockcount", vec![]))
//!     .await
//!     .unwrap();
//! assert_eq!(count, json!(420000));
//! assert_eq!(transport.calls().len(), 1);
//! # });
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;

use super::traits::{RpcError, RpcRequest, RpcTransport};

/// Mock transport for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

#[derive(Debug, Default)]
struct MockTransportInner {
    /// Queued responses by method.
    responses: HashMap<String, VecDeque<Result<Value, RpcError>>>,
    /// Recorded requests.
    calls: Vec<RpcRequest>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockTransportInner> {
        // A poisoned mock only happens after a test already panicked.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue a successful response for `method`.
    pub fn respond(&self, method: &str, value: Value) {
        self.push(method, Ok(value));
    }

    /// Queue a failure for `method`.
    pub fn fail(&self, method: &str, error: RpcError) {
        self.push(method, Err(error));
    }

    fn push(&self, method: &str, response: Result<Value, RpcError>) {
        self.lock()
            .responses
            .entry(method.to_string())
            .or_default()
            .push_back(response);
    }

    /// All requests seen so far.
    pub fn calls(&self) -> Vec<RpcRequest> {
        self.lock().calls.clone()
    }

    /// Requests seen for `method`.
    pub fn calls_to(&self, method: &str) -> Vec<RpcRequest> {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.method == method)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn call(&self, request: &RpcRequest) -> Result<Value, RpcError> {
        let mut inner = self.lock();
        inner.calls.push(request.clone());

        let Some(queue) = inner.responses.get_mut(&request.method) else {
            return Err(RpcError::Status {
                status: 404,
                message: "Method not found".to_string(),
            });
        };

        if queue.len() > 1 {
            queue.pop_front().unwrap_or_else(|| Ok(Value::Null))
        } else {
            queue.front().cloned().unwrap_or(Ok(Value::Null))
        }
    }
}
