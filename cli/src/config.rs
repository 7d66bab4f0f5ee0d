//! CLI configuration module.
//!
//! Handles loading configuration from environment variables with sensible
//! defaults. Command-line flags override anything set here.

use anyhow::{bail, Result};
use std::fmt;
use std::str::FromStr;

/// Encoding of a metric snapshot on disk or on a pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    /// Sparse JSON array of metrics.
    #[default]
    Json,
    /// Dense protobuf-encoded metric list.
    Rpc,
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "rpc" => Ok(Self::Rpc),
            other => bail!("Unknown format '{other}', expected 'json' or 'rpc'"),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Rpc => write!(f, "rpc"),
        }
    }
}

/// CLI configuration.
///
/// Configuration values can be set via environment variables:
/// - `TRICORDER_FORMAT`: Encoding of input snapshots (default: "json")
/// - `TRICORDER_PRETTY`: Indent JSON output when "true" or "1" (default: off)
/// - `TRICORDER_LOG`: Log filter used when `RUST_LOG` is unset (default: "info")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Encoding of input snapshots.
    pub input_format: Format,
    /// Whether JSON output is indented.
    pub pretty: bool,
    /// Fallback log filter.
    pub log_filter: String,
}

impl Config {
    /// Creates a new configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `TRICORDER_FORMAT` is set to an unknown format.
    pub fn from_env() -> Result<Self> {
        let input_format = std::env::var("TRICORDER_FORMAT")
            .ok()
            .map(|f| f.parse::<Format>())
            .transpose()?
            .unwrap_or_default();

        let pretty = std::env::var("TRICORDER_PRETTY")
            .is_ok_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"));

        let log_filter = std::env::var("TRICORDER_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            input_format,
            pretty,
            log_filter,
        })
    }

    /// Applies command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, format: Option<Format>, pretty: bool, verbose: bool) -> Self {
        if let Some(format) = format {
            self.input_format = format;
        }
        self.pretty |= pretty;
        if verbose {
            self.log_filter = "debug".to_string();
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_format: Format::Json,
            pretty: false,
            log_filter: "info".to_string(),
        }
    }
}
