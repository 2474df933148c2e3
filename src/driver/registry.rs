// Copyright (c) 2025 - Cowboy AI, Inc.
//! Driver Factory Registry
//!
//! Explicit map from driver name to constructor, built once at startup and
//! handed to the provider, the store and the reconcilers.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use super::{none, Driver, NoneDriver};

/// Builds a driver for `(machine name, base storage path)`
pub type DriverConstructor = Arc<dyn Fn(&str, &Path) -> Box<dyn Driver> + Send + Sync>;

#[derive(Clone, Default)]
pub struct DriverRegistry {
    constructors: BTreeMap<String, DriverConstructor>,
}

impl DriverRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the drivers that ship with this crate
    pub fn with_core_drivers() -> Self {
        Self::new().register(none::DRIVER_NAME, |machine, store_path| {
            Box::new(NoneDriver::new(machine, store_path))
        })
    }

    /// Add or replace a driver constructor
    pub fn register<F>(mut self, name: &str, constructor: F) -> Self
    where
        F: Fn(&str, &Path) -> Box<dyn Driver> + Send + Sync + 'static,
    {
        self.constructors
            .insert(name.to_string(), Arc::new(constructor));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered driver names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    /// Construct a fresh driver instance
    pub fn instantiate(
        &self,
        name: &str,
        machine: &str,
        store_path: &Path,
    ) -> Option<Box<dyn Driver>> {
        self.constructors
            .get(name)
            .map(|constructor| constructor(machine, store_path))
    }
}

impl fmt::Debug for DriverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverRegistry")
            .field("drivers", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}
