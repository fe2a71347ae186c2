//! core::config::daemon
//!
//! Daemon settings read from `<datadir>/bitcoin.conf`.
//!
//! The file is a list of `key=value` lines. Only the RPC credentials, the
//! RPC port and the testnet switch are used here; every other key belongs to
//! the daemon and is ignored.
//!
//! # Port resolution
//!
//! 1. An explicit `rpcport` always wins
//! 2. Otherwise `testnet=1` selects [`TESTNET_RPC_PORT`]
//! 3. Otherwise [`MAINNET_RPC_PORT`]

use std::fmt;
use std::fs;
use std::path::Path;

use super::{ConfigError, ConfigWarning};

/// Default mainnet RPC port.
pub const MAINNET_RPC_PORT: u16 = 8332;

/// Default testnet RPC port.
pub const TESTNET_RPC_PORT: u16 = 18332;

/// RPC settings extracted from `bitcoin.conf`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DaemonConfig {
    pub rpc_user: String,
    pub rpc_password: String,
    /// Explicit `rpcport`, if set
    pub rpc_port: Option<u16>,
    pub testnet: bool,
}

// Custom Debug to avoid exposing the password
impl fmt::Debug for DaemonConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DaemonConfig")
            .field("rpc_user", &self.rpc_user)
            .field("has_password", &!self.rpc_password.is_empty())
            .field("rpc_port", &self.rpc_port)
            .field("testnet", &self.testnet)
            .finish()
    }
}

impl DaemonConfig {
    /// Parse the contents of a `bitcoin.conf` file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unparseable `rpcport` or
    /// `testnet` value.
    ///
    /// # Example
    ///
    /// ```
    /// use sbtc::core::config::DaemonConfig;
    ///
    /// let config = DaemonConfig::parse("rpcuser=alice\ntestnet=1\n").unwrap();
    /// assert_eq!(config.rpc_user, "alice");
    /// assert_eq!(config.port(), 18332);
    /// ```
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let mut config = DaemonConfig::default();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim();

            match key.trim() {
                "rpcuser" => config.rpc_user = value.to_string(),
                "rpcpassword" => config.rpc_password = value.to_string(),
                "rpcport" => {
                    let port = value.parse::<u16>().map_err(|_| {
                        ConfigError::InvalidValue(format!("invalid rpcport '{}'", value))
                    })?;
                    config.rpc_port = Some(port);
                }
                "testnet" => {
                    config.testnet = match value {
                        "1" | "true" => true,
                        "0" | "false" | "" => false,
                        other => {
                            return Err(ConfigError::InvalidValue(format!(
                                "invalid testnet value '{}'",
                                other
                            )))
                        }
                    };
                }
                _ => {}
            }
        }

        Ok(config)
    }

    /// Load `bitcoin.conf` from `path`.
    ///
    /// A missing file is not an error: defaults are returned with a warning.
    pub fn load(path: &Path) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        if !path.exists() {
            return Ok((
                DaemonConfig::default(),
                vec![ConfigWarning {
                    message: "daemon config not found, using defaults".to_string(),
                    path: path.to_path_buf(),
                }],
            ));
        }

        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok((Self::parse(&contents)?, Vec::new()))
    }

    /// Effective RPC port after applying the resolution rules.
    pub fn port(&self) -> u16 {
        match self.rpc_port {
            Some(port) => port,
            None if self.testnet => TESTNET_RPC_PORT,
            None => MAINNET_RPC_PORT,
        }
    }
}
