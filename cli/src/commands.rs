//! Subcommand implementations.
//!
//! Decoding and encoding work on byte buffers; only the thin `read_input`
//! and `write_output` helpers touch files or standard streams.

use crate::config::{Config, Format};
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use messages::json;
use messages::models::{Duration, MetricList};
use std::io::{Read, Write};
use std::path::Path;

/// Reads a file, or standard input for `-`.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("Failed to read standard input")?;
        Ok(bytes)
    } else {
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

/// Writes to a file, or standard output for `-` or no path.
pub fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write {}", path.display())),
        _ => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Decodes and validates a snapshot.
pub fn decode(bytes: &[u8], format: Format) -> Result<MetricList> {
    let list = match format {
        Format::Json => {
            let text = std::str::from_utf8(bytes).context("JSON input is not UTF-8")?;
            MetricList::from_json_str(text)?
        }
        Format::Rpc => MetricList::decode_rpc(bytes)?,
    };
    tracing::debug!(%format, metrics = list.len(), "Loaded snapshot");
    Ok(list)
}

/// Encodes a snapshot.
pub fn encode(list: &MetricList, format: Format, pretty: bool) -> Result<Vec<u8>> {
    Ok(match format {
        Format::Json if pretty => list.to_json_string_pretty()?.into_bytes(),
        Format::Json => list.to_json_string()?.into_bytes(),
        Format::Rpc => list.encode_rpc(),
    })
}

/// Re-encodes a snapshot in `to`.
pub fn convert(config: &Config, input: &[u8], to: Format) -> Result<Vec<u8>> {
    let list = decode(input, config.input_format)?;
    tracing::info!(from = %config.input_format, %to, metrics = list.len(), "Converting snapshot");
    encode(&list, to, config.pretty)
}

/// Validates a snapshot and returns the number of metrics in it.
pub fn validate(config: &Config, input: &[u8]) -> Result<usize> {
    Ok(decode(input, config.input_format)?.len())
}

/// Looks up one metric and renders it as JSON.
pub fn get(config: &Config, input: &[u8], path: &str) -> Result<String> {
    let list = decode(input, config.input_format)?;
    let metric = list
        .get(path)
        .with_context(|| format!("Looking up {path}"))?;

    let wire = json::Metric::from(metric);
    let text = if config.pretty {
        serde_json::to_string_pretty(&wire)?
    } else {
        serde_json::to_string(&wire)?
    };
    Ok(text)
}

/// Renders decimal seconds since the Unix epoch as an RFC 3339 timestamp.
pub fn time(seconds: &str) -> Result<String> {
    let since_epoch: Duration = seconds.parse()?;
    Ok(since_epoch
        .to_date_time()
        .to_rfc3339_opts(SecondsFormat::Nanos, true))
}

/// Renders the current time as decimal seconds since the Unix epoch.
pub fn now() -> String {
    Duration::since_epoch(Utc::now()).to_decimal_seconds()
}
