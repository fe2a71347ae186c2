//! rpc::traits
//!
//! Transport trait and wire types for JSON-RPC calls to the daemon.
//!
//! # Design
//!
//! The `RpcTransport` trait is async because calls involve network I/O.
//! The console drives it from synchronous code on a current-thread runtime.
//!
//! # Example
//!
//! ```ignore
//! use sbtc::rpc::{RpcRequest, RpcTransport};
//!
//! async fn block_count(transport: &dyn RpcTransport) -> Result<u64, RpcError> {
//!     let value = transport.call(&RpcRequest::new("getblockcount", vec![])).await?;
//!     Ok(value.as_u64().unwrap_or_default())
//! }
//! ```

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// JSON-RPC protocol version sent with every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// Errors from RPC calls.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RpcError {
    /// The daemon answered with a non-success HTTP status.
    #[error("RPCError (HTTP {status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message from the daemon
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("failed to decode RPC response: {0}")]
    Decode(String),
}

impl RpcError {
    /// Status error with the generic message used when the body is unreadable.
    pub fn bare_status(status: u16) -> Self {
        RpcError::Status {
            status,
            message: format!("Error code {} when connecting via RPC.", status),
        }
    }
}

/// Request body: `{method, params, jsonrpc: "2.0", id: 0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub method: String,
    pub params: Vec<Value>,
    pub jsonrpc: String,
    pub id: u64,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            params,
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: 0,
        }
    }
}

/// Response body.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub error: Option<RpcErrorBody>,
}

/// The `error` member of a response body.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
}

/// Where and how to reach the daemon.
#[derive(Clone, PartialEq, Eq)]
pub struct RpcEndpoint {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

// Custom Debug to avoid exposing the password
impl fmt::Debug for RpcEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcEndpoint")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("has_password", &!self.password.is_empty())
            .finish()
    }
}

impl RpcEndpoint {
    /// `http://<host>:<port>/`
    pub fn url(&self) -> String {
        format!("http://{}:{}/", self.host, self.port)
    }
}

/// A JSON-RPC transport.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Perform one call and return the decoded `result` member.
    async fn call(&self, request: &RpcRequest) -> Result<Value, RpcError>;
}
