//! rpc::http
//!
//! HTTP transport for the daemon's JSON-RPC endpoint.
//!
//! # Protocol
//!
//! - `POST http://<host>:<port>/` with a JSON body and basic auth
//! - 200 → the `result` member (an `error` member still counts as a failure)
//! - anything else → [`RpcError::Status`] carrying the daemon's message when
//!   the body is JSON, a generic message otherwise
//!
//! # Example
//!
//! ```ignore
//! use sbtc::rpc::{HttpTransport, RpcEndpoint, RpcRequest, RpcTransport};
//!
//! let transport = HttpTransport::new(endpoint);
//! let count = transport.call(&RpcRequest::new("getblockcount", vec![])).await?;
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderValue, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

use super::traits::{RpcEndpoint, RpcError, RpcRequest, RpcResponse, RpcTransport};

/// User-Agent header value for RPC requests.
const USER_AGENT_VALUE: &str = "sbtc";

/// JSON-RPC over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// HTTP client for making requests
    client: Client,
    /// Daemon address and credentials
    endpoint: RpcEndpoint,
}

impl HttpTransport {
    pub fn new(endpoint: RpcEndpoint) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &RpcEndpoint {
        &self.endpoint
    }

    /// Map an HTTP response onto a result or an [`RpcError`].
    async fn handle_response(response: Response) -> Result<Value, RpcError> {
        let status = response.status();

        if status == StatusCode::OK {
            let body: RpcResponse = response
                .json()
                .await
                .map_err(|e| RpcError::Decode(e.to_string()))?;

            return match body.error {
                Some(error) => Err(RpcError::Status {
                    status: status.as_u16(),
                    message: error.message,
                }),
                None => Ok(body.result),
            };
        }

        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<RpcResponse>(&text) {
            Ok(RpcResponse {
                error: Some(error), ..
            }) => Err(RpcError::Status {
                status: status.as_u16(),
                message: error.message,
            }),
            _ => Err(RpcError::bare_status(status.as_u16())),
        }
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn call(&self, request: &RpcRequest) -> Result<Value, RpcError> {
        let response = self
            .client
            .post(self.endpoint.url())
            .header(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE))
            .basic_auth(&self.endpoint.user, Some(&self.endpoint.password))
            .json(request)
            .send()
            .await
            .map_err(|e| RpcError::Network(e.to_string()))?;

        Self::handle_response(response).await
    }
}
