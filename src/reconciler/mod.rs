// Copyright (c) 2025 - Cowboy AI, Inc.
//! Machine Reconciler
//!
//! Create, read, update, delete and existence operations for one driver's
//! machine resource. Each operation works on a [`ResourceDescriptor`] handed
//! in by the host framework and writes observed values back into it.
//!
//! # Flow
//!
//! ```text
//! create: validate → exists? → host record → driver options → driver.create
//!         → save → converge(state) → refresh observed fields → set id
//! read:   load → state → refresh observed fields
//! update: load → state changed? → converge → refresh
//! delete: load → driver.remove → store.remove → still present?
//! ```
//!
//! The host framework serializes calls for one resource identity. Distinct
//! identities may be reconciled concurrently; a reconciler holds no mutable
//! state.

mod create;
mod delete;
pub mod host_options;
pub mod observe;
mod read;
mod update;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{CapabilityFlag, PowerState, ResourceDescriptor};
use crate::driver::{Driver, DriverRegistry};
use crate::errors::{ReconcileError, ReconcileResult};
use crate::schema::builtin::STATE;
use crate::store::{Machine, MachineStore};

pub use host_options::HostPaths;

/// Pause before collecting diagnostics for a failed create
pub const DEFAULT_CRASH_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Reconciles machines of one driver type
#[derive(Clone)]
pub struct Reconciler {
    driver_name: String,
    flags: Arc<[CapabilityFlag]>,
    store: Arc<dyn MachineStore>,
    registry: Arc<DriverRegistry>,
    crash_settle_delay: Duration,
}

impl Reconciler {
    pub fn new(
        driver_name: impl Into<String>,
        flags: impl Into<Arc<[CapabilityFlag]>>,
        store: Arc<dyn MachineStore>,
        registry: Arc<DriverRegistry>,
    ) -> Self {
        Self {
            driver_name: driver_name.into(),
            flags: flags.into(),
            store,
            registry,
            crash_settle_delay: DEFAULT_CRASH_SETTLE_DELAY,
        }
    }

    pub fn with_crash_settle_delay(mut self, delay: Duration) -> Self {
        self.crash_settle_delay = delay;
        self
    }

    pub fn driver_name(&self) -> &str {
        &self.driver_name
    }

    pub fn flags(&self) -> &[CapabilityFlag] {
        &self.flags
    }

    fn instantiate(&self, name: &str) -> ReconcileResult<Box<dyn Driver>> {
        self.registry
            .instantiate(&self.driver_name, name, self.store.base_path())
            .ok_or_else(|| ReconcileError::UnknownDriver(self.driver_name.clone()))
    }

    async fn load(&self, descriptor: &ResourceDescriptor) -> ReconcileResult<Machine> {
        let name = descriptor.name()?;
        Ok(self.store.load(name).await?)
    }
}

/// Requested power state; `running` when unset
fn target_state(descriptor: &ResourceDescriptor) -> ReconcileResult<PowerState> {
    match descriptor.string(STATE)? {
        Some(value) => Ok(value.parse()?),
        None => Ok(PowerState::default()),
    }
}

impl fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reconciler")
            .field("driver_name", &self.driver_name)
            .field("flags", &self.flags.len())
            .field("store", &self.store.base_path())
            .field("crash_settle_delay", &self.crash_settle_delay)
            .finish()
    }
}
