//! Bill preview binary
//!
//! Reads a preview request as JSON and prints the computed bill.
//!
//! # Usage
//!
//! ```bash
//! # From a file
//! cargo run --bin bill-preview -- request.json
//!
//! # From stdin, with JSON logs on stderr
//! PHARMACY_LOG_FORMAT=json cargo run --bin bill-preview < request.json
//! ```
//!
//! # Environment Variables
//!
//! * `PHARMACY_CURRENCY` - Default bill currency (default: INR)
//! * `PHARMACY_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `PHARMACY_LOG_FORMAT` - Log format: pretty, json (default: pretty)
//! * `PHARMACY_EXCLUDE_EXPIRED` - Skip expired batches (default: false)

use std::io::Read;

use anyhow::Context;
use interface_cli::{preview_json, LogFormat, PreviewConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = PreviewConfig::from_env().context("Invalid PHARMACY_* configuration")?;
    init_tracing(&config);

    let input = read_input(std::env::args().nth(1).as_deref())?;
    let output = preview_json(&input, &config)?;
    println!("{}", output);

    Ok(())
}

/// Reads the request from `path`, or stdin when no path or `-` is given
fn read_input(path: Option<&str>) -> anyhow::Result<String> {
    match path {
        Some(path) if path != "-" => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
        }
        _ => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read request from stdin")?;
            Ok(input)
        }
    }
}

/// Initializes the tracing subscriber; logs go to stderr so stdout stays JSON
fn init_tracing(config: &PreviewConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
