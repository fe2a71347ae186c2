//! console::error
//!
//! Command failures and how the session reports them.

use std::io;

use thiserror::Error;

use crate::core::config::ConfigError;
use crate::core::convert::ConversionError;
use crate::core::dispatch::DispatchError;
use crate::rpc::RpcError;
use crate::trust::{ProcessIdentity, TrustError};

/// Why a console command failed.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// The trust gate refused the call.
    #[error("!!WARNING!! daemon on port {port} was started by a different UID.")]
    Blocked {
        port: u16,
        /// Recorded uid, absent when the listener's ids were inconsistent
        trusted: Option<u32>,
        observed: ProcessIdentity,
    },

    #[error(transparent)]
    Trust(#[from] TrustError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("usage: {0}")]
    Usage(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// The line shown to the operator for a failed dispatch, or `None` for a
/// registry miss (the caller shows the command list instead).
pub fn failure_message(err: &DispatchError<CommandError>) -> Option<String> {
    match err {
        DispatchError::NotFound(_) => None,
        DispatchError::ArityMismatch { .. } => Some(format!("Error: {}", err)),
        DispatchError::Handler(e @ CommandError::Rpc(RpcError::Status { .. }))
        | DispatchError::Handler(e @ CommandError::Blocked { .. })
        | DispatchError::Handler(e @ CommandError::Usage(_)) => Some(e.to_string()),
        DispatchError::Handler(e) => Some(format!("Error running command: {}", e)),
    }
}
