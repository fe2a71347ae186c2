//! trust
//!
//! Verify the daemon on the RPC port runs as the uid first seen there.
//!
//! # Modules
//!
//! - [`store`]: Append-only `port:uid` records in `<datadir>/sbtc.uids`
//! - [`inspector`]: Listener lookup (procfs on Linux, fixed tables in tests)
//! - [`gate`]: The per-call decision
//!
//! # Example
//!
//! ```ignore
//! use sbtc::trust::{system_inspector, TrustGate, TrustStore};
//!
//! let (store, _) = TrustStore::load(datadir.trust_store_path())?;
//! let mut gate = TrustGate::new(store, system_inspector(), false);
//! if !gate.check(8332)?.allows() {
//!     // refuse the call
//! }
//! ```

pub mod gate;
pub mod inspector;
pub mod store;

pub use gate::{GateDecision, TrustGate};
pub use inspector::{
    system_inspector, NullInspector, PortOwner, ProcessIdentity, ProcessInspector,
    ProcfsInspector, StaticInspector,
};
pub use store::{MalformedRecord, TrustStore};

use std::path::PathBuf;

use thiserror::Error;

/// Errors from trust store and listener inspection.
#[derive(Debug, Error)]
pub enum TrustError {
    #[error("failed to read trust store '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to append to trust store '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot inspect port owner: {0}")]
    Inspect(String),
}
