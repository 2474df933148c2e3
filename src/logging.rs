// Copyright (c) 2025 - Cowboy AI, Inc.
//! Logging setup
//!
//! Logs go to stderr so stdout stays free for machine-readable output.
//! `RUST_LOG` overrides the default filter.

use tracing_subscriber::EnvFilter;

use crate::config::ConfigError;

/// Install the global tracing subscriber
///
/// `debug` lowers the crate's default level from `info` to `debug`.
pub fn init(debug: bool) -> Result<(), ConfigError> {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cim_machine={level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| ConfigError::Logging(e.to_string()))
}
