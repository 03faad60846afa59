//! Service configuration
//!
//! Settings come from an optional YAML file, with command-line flags and
//! `PHA_*` environment variables filling whatever the file leaves blank.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::cli::Cli;

/// Address the HTTP server binds when none is configured
pub const DEFAULT_LISTEN_ADDRESS: &str = "127.0.0.1:8080";

/// Environment variable whose mere presence enables debug mode
pub const DEBUG_ENV: &str = "PHA_DEBUG";

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML for `Config`
    #[error("Failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// No API key was provided anywhere
    #[error("NASA API key not set")]
    MissingApiKey,
}

/// Resolved service configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Show error messages to HTTP clients and log at debug level
    pub debug: bool,
    /// Address for the HTTP server, e.g. "127.0.0.1:8080"
    pub listen_address: String,
    /// Key for the NeoWs API
    pub nasa_api_key: String,
    /// Verify the feed's TLS certificate (off unless asked for)
    pub verify_upstream_tls: bool,
}

impl Config {
    /// Loads configuration from a YAML file
    ///
    /// Keys missing from the file keep their default (empty) values; an
    /// empty file yields the default config.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_yaml::from_str(&raw)?)
    }

    /// Checks that required fields are set
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nasa_api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }

    /// Resolves configuration from parsed CLI arguments and the environment
    ///
    /// Debug mode is also switched on when `PHA_DEBUG` is set to any value.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        Self::resolve(cli, std::env::var_os(DEBUG_ENV).is_some())
    }

    /// File values take precedence; CLI/env values only fill blanks.
    fn resolve(cli: &Cli, debug_env_set: bool) -> Result<Self, ConfigError> {
        let mut config = match non_empty(cli.config.as_deref()) {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };

        if config.listen_address.is_empty() {
            config.listen_address = match cli.listen_address.as_deref() {
                Some(address) if !address.is_empty() => address.to_string(),
                _ => {
                    log::debug!(
                        "listen address not specified, using default {}",
                        DEFAULT_LISTEN_ADDRESS
                    );
                    DEFAULT_LISTEN_ADDRESS.to_string()
                }
            };
        }

        if config.nasa_api_key.is_empty() {
            if let Some(key) = cli.api_key.as_deref() {
                config.nasa_api_key = key.to_string();
            }
        }

        config.validate()?;

        if cli.debug || debug_env_set {
            config.debug = true;
        }
        if cli.verify_upstream_tls {
            config.verify_upstream_tls = true;
        }

        Ok(config)
    }
}

fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}
