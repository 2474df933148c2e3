// Copyright (c) 2025 - Cowboy AI, Inc.
//! Machine Schema Dump
//!
//! Prints the provider schema and the synthesized resource schema of every
//! registered driver as JSON.
//!
//! Run with: cargo run --bin machine-schema [driver]
//!
//! Honors `MACHINE_STORAGE_PATH`, `MACHINE_CERTS_DIRECTORY` and
//! `MACHINE_DEBUG`.

use anyhow::{bail, Context, Result};
use cim_machine::{logging, provider, DriverRegistry, Provider, ProviderConfig};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "machine-schema", version, about = "Dump machine resource schemas as JSON")]
struct Args {
    /// Only dump the resource schema of this driver
    driver: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = ProviderConfig::from_env().context("Failed to load provider configuration")?;
    logging::init(config.debug)?;

    let provider = Provider::new(config, DriverRegistry::with_core_drivers())?;

    let document = match args.driver {
        Some(driver) => {
            let name = provider::resource_type(&driver);
            let Some(resource) = provider.resource(&name) else {
                bail!("Unknown driver {driver:?}");
            };
            info!("Dumping schema for {}", name);
            serde_json::to_value(resource.schema())?
        }
        None => provider.schema_document(),
    };

    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
