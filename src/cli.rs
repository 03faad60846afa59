//! Command-line interface parsing for the hazardous asteroids service
//!
//! Every option can also be supplied through a `PHA_*` environment variable.
//! Values from a config file take precedence; see `Config::from_cli`.

use std::path::PathBuf;

use clap::Parser;

/// Serve today's potentially hazardous asteroids as JSON
#[derive(Parser, Debug, Default)]
#[command(name = "pha")]
#[command(about = "Serve today's potentially hazardous asteroids from the NASA NeoWs feed")]
#[command(version)]
pub struct Cli {
    /// Path to a YAML config file
    #[arg(long = "config", env = "PHA_CONFIG_FPATH", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Address to listen on [default: 127.0.0.1:8080]
    #[arg(long, env = "PHA_LISTEN_ADDRESS", value_name = "ADDR")]
    pub listen_address: Option<String>,

    /// NASA API key
    #[arg(long, env = "PHA_NASA_API_KEY", value_name = "KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Show error details in responses and log at debug level (also set by PHA_DEBUG)
    #[arg(long)]
    pub debug: bool,

    /// Verify the feed's TLS certificate
    #[arg(long)]
    pub verify_upstream_tls: bool,
}
