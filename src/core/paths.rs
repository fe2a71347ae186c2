//! core::paths
//!
//! Centralized path routing for files inside the daemon data directory.
//!
//! # Storage Layout
//!
//! - `bitcoin.conf` - Daemon settings (read only)
//! - `sbtc.uids` - Append-only trust records, one `port:uid` per line
//!
//! No code outside this module should join file names onto the datadir.
//!
//! # Example
//!
//! ```
//! use sbtc::core::paths::DataDir;
//! use std::path::PathBuf;
//!
//! let datadir = DataDir::new("/home/op/.bitcoin");
//! assert_eq!(
//!     datadir.trust_store_path(),
//!     PathBuf::from("/home/op/.bitcoin/sbtc.uids")
//! );
//! ```

use std::path::{Path, PathBuf};

use super::config::ConfigError;

/// Daemon settings file name.
pub const DAEMON_CONFIG_FILE: &str = "bitcoin.conf";

/// Trust store file name.
pub const TRUST_STORE_FILE: &str = "sbtc.uids";

/// The daemon data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `~/.bitcoin`
    pub fn default_location() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::new(home.join(".bitcoin")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn daemon_config_path(&self) -> PathBuf {
        self.root.join(DAEMON_CONFIG_FILE)
    }

    pub fn trust_store_path(&self) -> PathBuf {
        self.root.join(TRUST_STORE_FILE)
    }
}
