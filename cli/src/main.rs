//! Tricorder CLI
//!
//! Command-line interface for converting, validating and querying metric
//! snapshots in the RPC and JSON encodings.
//!
//! # Usage
//!
//! ```bash
//! tricorder --help
//! tricorder validate metrics.json
//! tricorder convert metrics.json --to rpc -o metrics.bin
//! tricorder --format rpc get metrics.bin --path /proc/memory/free
//! tricorder time 1234567890.987654321
//! ```

#![deny(unsafe_code)]

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::{Config, Format};
use std::path::PathBuf;

/// Tricorder CLI - metric snapshot tool
#[derive(Parser)]
#[command(name = "tricorder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Encoding of input snapshots [env: TRICORDER_FORMAT]
    #[arg(short, long, global = true, value_enum)]
    format: Option<Format>,

    /// Indent JSON output [env: TRICORDER_PRETTY]
    #[arg(short, long, global = true)]
    pretty: bool,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Re-encode a snapshot
    Convert {
        /// Input file, or - for standard input
        input: PathBuf,
        /// Output encoding
        #[arg(long, value_enum)]
        to: Format,
        /// Output file, or - for standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decode and validate a snapshot
    Validate {
        /// Input file, or - for standard input
        input: PathBuf,
    },
    /// Print one metric of a snapshot as JSON
    Get {
        /// Input file, or - for standard input
        input: PathBuf,
        /// Absolute path of the metric
        #[arg(long)]
        path: String,
    },
    /// Convert decimal seconds since the Unix epoch to RFC 3339
    Time {
        /// Seconds since the epoch, e.g. 1234567890.987654321
        #[arg(required_unless_present = "now", allow_hyphen_values = true)]
        seconds: Option<String>,
        /// Print the current time as decimal seconds instead
        #[arg(long, conflicts_with = "seconds")]
        now: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_overrides(cli.format, cli.pretty, cli.verbose);

    // Initialize tracing; stdout is reserved for data.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Convert { input, to, output }) => {
            let bytes = commands::read_input(&input)?;
            let converted = commands::convert(&config, &bytes, to)?;
            commands::write_output(output.as_deref(), &converted)?;
        }
        Some(Commands::Validate { input }) => {
            let bytes = commands::read_input(&input)?;
            let count = commands::validate(&config, &bytes)?;
            println!("{count} metric(s) valid");
        }
        Some(Commands::Get { input, path }) => {
            let bytes = commands::read_input(&input)?;
            println!("{}", commands::get(&config, &bytes, &path)?);
        }
        Some(Commands::Time { seconds, now }) => match seconds {
            Some(seconds) if !now => println!("{}", commands::time(&seconds)?),
            _ => println!("{}", commands::now()),
        },
        None => {
            println!("Tricorder CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
