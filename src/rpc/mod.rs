//! rpc
//!
//! JSON-RPC access to the local daemon.
//!
//! # Architecture
//!
//! The `RpcTransport` trait is the seam between console commands and the
//! network. Commands never talk to the transport directly: every call goes
//! through the session, which consults the trust gate first.
//!
//! # Modules
//!
//! - `traits`: `RpcTransport` trait, request/response and error types
//! - [`http`]: reqwest transport with basic auth
//! - [`mock`]: In-memory transport for deterministic testing
//! - [`methods`]: Daemon methods exposed as console commands
//!
//! # Example
//!
//! ```ignore
//! use sbtc::rpc::{HttpTransport, RpcEndpoint, RpcRequest, RpcTransport};
//!
//! let transport = HttpTransport::new(RpcEndpoint {
//!     host: "127.0.0.1".to_string(),
//!     port: 8332,
//!     user: "op".to_string(),
//!     password: "secret".to_string(),
//! });
//! let info = transport.call(&RpcRequest::new("getblockchaininfo", vec![])).await?;
//! ```

pub mod http;
pub mod methods;
pub mod mock;
mod traits;

pub use http::HttpTransport;
pub use traits::*;
