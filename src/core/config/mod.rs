//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! sbtc reads two files:
//! - **Console settings**: TOML, user scope (datadir, host, trust bypass)
//! - **Daemon settings**: `<datadir>/bitcoin.conf` (RPC credentials and port)
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Console settings file
//! 3. CLI flags (not handled here)
//!
//! # Console Settings Locations
//!
//! Searched in order:
//! 1. `$SBTC_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/sbtc/config.toml`
//! 3. `~/.sbtc/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use sbtc::core::config::Config;
//!
//! let result = Config::load().unwrap();
//! let config = result.config;
//! println!("Host: {}", config.rpc_host());
//! println!("Bypass trust gate: {}", config.ignore_daemon_uid());
//! ```

mod daemon;
pub mod schema;

pub use daemon::{DaemonConfig, MAINNET_RPC_PORT, TESTNET_RPC_PORT};
pub use schema::{ConsoleConfig, WatchConfig};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV: &str = "SBTC_CONFIG";

/// Default RPC host.
pub const DEFAULT_RPC_HOST: &str = "127.0.0.1";

/// Default progress watch interval.
pub const DEFAULT_WATCH_INTERVAL: Duration = Duration::from_millis(500);

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Loaded console settings with defaults applied by accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed settings file
    pub console: ConsoleConfig,
    /// Path the settings were loaded from (if any)
    console_path: Option<PathBuf>,
}

impl Config {
    /// Load console settings from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file exists but cannot be parsed.
    /// A missing file is not an error (defaults are used).
    pub fn load() -> Result<ConfigLoadResult, ConfigError> {
        let candidates = Self::candidate_paths(|key| std::env::var(key).ok(), dirs::home_dir());
        Self::load_first(&candidates)
    }

    /// Load from the first existing path in `candidates`.
    pub fn load_first(candidates: &[PathBuf]) -> Result<ConfigLoadResult, ConfigError> {
        for path in candidates {
            if path.exists() {
                return Self::load_from(path);
            }
        }

        Ok(ConfigLoadResult {
            config: Config::default(),
            warnings: Vec::new(),
        })
    }

    /// Load console settings from a specific file.
    pub fn load_from(path: &Path) -> Result<ConfigLoadResult, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let console: ConsoleConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        console.validate()?;

        let mut warnings = Vec::new();
        if let Some(datadir) = &console.datadir {
            if !datadir.is_dir() {
                warnings.push(ConfigWarning {
                    message: format!("datadir '{}' does not exist", datadir.display()),
                    path: path.to_path_buf(),
                });
            }
        }

        Ok(ConfigLoadResult {
            config: Config {
                console,
                console_path: Some(path.to_path_buf()),
            },
            warnings,
        })
    }

    /// Settings file locations in search order.
    ///
    /// `env` looks up environment variables; `home` is the user's home.
    pub fn candidate_paths(
        env: impl Fn(&str) -> Option<String>,
        home: Option<PathBuf>,
    ) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(path) = env(CONFIG_ENV) {
            paths.push(PathBuf::from(path));
        }
        if let Some(xdg_home) = env("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_home).join("sbtc/config.toml"));
        }
        if let Some(home) = home {
            paths.push(home.join(".sbtc/config.toml"));
        }

        paths
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Configured datadir, if any.
    pub fn datadir(&self) -> Option<&Path> {
        self.console.datadir.as_deref()
    }

    /// Whether the trust gate is bypassed.
    ///
    /// Defaults to `false` if not configured.
    pub fn ignore_daemon_uid(&self) -> bool {
        self.console.ignore_daemon_uid.unwrap_or(false)
    }

    /// Host the daemon listens on.
    ///
    /// Defaults to `127.0.0.1` if not configured.
    pub fn rpc_host(&self) -> &str {
        self.console.rpc_host.as_deref().unwrap_or(DEFAULT_RPC_HOST)
    }

    /// Progress watch poll interval.
    ///
    /// Defaults to 500ms if not configured.
    pub fn watch_interval(&self) -> Duration {
        self.console
            .watch
            .as_ref()
            .and_then(|w| w.interval_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_WATCH_INTERVAL)
    }

    /// Get the path the settings were loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.console_path.as_deref()
    }
}
