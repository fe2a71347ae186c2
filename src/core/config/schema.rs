//! core::config::schema
//!
//! Console settings schema.
//!
//! Located at (in order of precedence):
//! 1. `$SBTC_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/sbtc/config.toml`
//! 3. `~/.sbtc/config.toml`
//!
//! # Validation
//!
//! Values are validated after parsing (non-empty host, positive watch
//! interval).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Console settings (user scope).
///
/// # Example
///
/// ```toml
/// datadir = "/srv/bitcoin"
/// ignore_daemon_uid = false
/// rpc_host = "127.0.0.1"
///
/// [watch]
/// interval_ms = 500
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Daemon data directory holding `bitcoin.conf` and `sbtc.uids`
    pub datadir: Option<PathBuf>,

    /// Skip the daemon ownership check entirely
    pub ignore_daemon_uid: Option<bool>,

    /// Host the daemon listens on
    pub rpc_host: Option<String>,

    /// Progress watch settings
    pub watch: Option<WatchConfig>,
}

impl ConsoleConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(host) = &self.rpc_host {
            if host.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "rpc_host cannot be empty".to_string(),
                ));
            }
        }

        if let Some(watch) = &self.watch {
            watch.validate()?;
        }

        Ok(())
    }
}

/// Progress watch settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WatchConfig {
    /// Poll interval in milliseconds
    pub interval_ms: Option<u64>,
}

impl WatchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_ms == Some(0) {
            return Err(ConfigError::InvalidValue(
                "watch.interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
