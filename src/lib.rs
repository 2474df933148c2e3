// Copyright (c) 2025 - Cowboy AI, Inc.
//! Declarative machine management for the Composable Information Machine
//!
//! Exposes every provisioning driver as a declarative resource type: the
//! resource schema is synthesized from the driver's capability flags, user
//! configuration is translated into the driver's native options, and a
//! reconciler drives each machine through create, read, update and delete,
//! including its running/stopped power state.

pub mod config;
pub mod domain;
pub mod driver;
pub mod errors;
pub mod lifecycle;
pub mod logging;
pub mod provider;
pub mod reconciler;
pub mod schema;
pub mod state_machine;
pub mod store;
pub mod translate;

// Re-export commonly used types
pub use config::{ConfigError, ProviderConfig};
pub use domain::{
    AttributeValue, CapabilityFlag, FlagKind, MachineName, MachineState, PowerState,
    ResourceDescriptor,
};
pub use driver::{Driver, DriverError, DriverRegistry};
pub use errors::{CrashReport, ReconcileError, ReconcileResult};
pub use provider::{MachineResource, Provider};
pub use reconciler::Reconciler;
pub use schema::{synthesize, AttributeSchema, AttributeSpec, SchemaError};
pub use store::{FileStore, MachineStore, StoreError};
pub use translate::{to_driver_options, DriverOptions};
