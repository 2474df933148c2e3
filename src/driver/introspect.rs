// Copyright (c) 2025 - Cowboy AI, Inc.
//! Capability Introspection

use tracing::debug;

use super::Driver;
use crate::domain::{CapabilityFlag, FlagError};

/// Retrieve a driver's creation flags as typed capability flags
///
/// Fails on the first flag whose kind or default cannot be represented.
pub fn introspect(driver: &dyn Driver) -> Result<Vec<CapabilityFlag>, FlagError> {
    let flags = driver
        .create_flags()
        .into_iter()
        .map(CapabilityFlag::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "Driver {} declares {} creation flags",
        driver.driver_name(),
        flags.len()
    );
    Ok(flags)
}
