// Copyright (c) 2025 - Cowboy AI, Inc.
//! Machine Domain Models
//!
//! Core value objects shared by the schema synthesizer, the flag translator and
//! the reconciler.
//!
//! # Value Objects with Invariants
//!
//! - [`MachineName`] - hostname-validated machine identity
//! - [`AttributeValue`] - closed set of attribute representations
//! - [`CapabilityFlag`] - typed driver creation option
//! - [`MachineState`] / [`PowerState`] - observed and requested power state
//!
//! # Entities
//!
//! - [`ResourceDescriptor`] - configuration and observed state of one machine
//! - [`HostRecord`] - assembled host handed to the driver and persisted

pub mod descriptor;
pub mod flag;
pub mod host;
pub mod hostname;
pub mod machine_state;
pub mod value;

pub use descriptor::{AttributeError, ResourceDescriptor};
pub use flag::{normalize_flag_name, CapabilityFlag, FlagDescriptor, FlagError, FlagKind};
pub use host::{AuthOptions, EngineOptions, HostOptions, HostRecord, SwarmOptions};
pub use hostname::{MachineName, MachineNameError};
pub use machine_state::{InvalidPowerState, MachineState, PowerState};
pub use value::{AttributeType, AttributeValue};
