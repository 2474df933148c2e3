// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provisioning Driver Abstraction
//!
//! A driver knows how to create, inspect, start, stop and destroy a machine on
//! one kind of infrastructure. The reconciler only talks to drivers through the
//! [`Driver`] trait; how a driver reaches its backend (in-process, plugin
//! subprocess, remote API) is its own business.
//!
//! # Architecture
//!
//! ```text
//! DriverRegistry (name → constructor)
//!     ↓ instantiate
//! Box<dyn Driver> ── create_flags ──→ introspect → CapabilityFlag → schema
//!     ↑
//! Reconciler ── set_config_from_flags / create / state / start / stop / remove
//! ```
//!
//! Every call is awaited to completion before the next one is issued. Drivers
//! own their timeout and failure semantics.

pub mod introspect;
pub mod none;
pub mod registry;

use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::{FlagDescriptor, MachineState};
use crate::translate::DriverOptions;

pub use introspect::introspect;
pub use none::NoneDriver;
pub use registry::{DriverConstructor, DriverRegistry};

/// Errors reported by a driver
#[derive(Debug, Error)]
pub enum DriverError {
    /// Operation is not available for this driver
    #[error("{0}")]
    Unsupported(String),

    /// Options or persisted configuration are unusable
    #[error("Invalid driver configuration: {0}")]
    InvalidConfig(String),

    /// Backend rejected or failed the call
    #[error("{0}")]
    Backend(String),

    #[error("Driver configuration serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Driver query or transition, named for error context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverOperation {
    State,
    Start,
    Stop,
    SshHostname,
    SshPort,
    Address,
    EndpointUrl,
    EngineVersion,
}

impl fmt::Display for DriverOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            DriverOperation::State => "retrieve state",
            DriverOperation::Start => "start machine",
            DriverOperation::Stop => "stop machine",
            DriverOperation::SshHostname => "retrieve ssh hostname",
            DriverOperation::SshPort => "retrieve ssh port",
            DriverOperation::Address => "retrieve address",
            DriverOperation::EndpointUrl => "retrieve endpoint url",
            DriverOperation::EngineVersion => "retrieve engine version",
        };
        f.write_str(description)
    }
}

/// Provisioning backend for one infrastructure type
#[async_trait]
pub trait Driver: Send + Sync {
    /// Registry name of this driver
    fn driver_name(&self) -> &str;

    /// Options accepted at creation time
    fn create_flags(&self) -> Vec<FlagDescriptor>;

    /// Apply creation options before `create`
    fn set_config_from_flags(&mut self, options: &DriverOptions) -> Result<(), DriverError>;

    /// Serialize driver-owned configuration for persistence
    fn config(&self) -> Result<serde_json::Value, DriverError>;

    /// Restore configuration produced by [`Driver::config`]
    fn load_config(&mut self, config: serde_json::Value) -> Result<(), DriverError>;

    /// Local diagnostic log worth attaching to crash reports, if the driver
    /// writes one
    fn diagnostic_log(&self, _base_path: &Path, _machine: &str) -> Option<PathBuf> {
        None
    }

    fn ssh_username(&self) -> String;

    fn ssh_key_path(&self) -> String;

    async fn create(&self) -> Result<(), DriverError>;

    async fn state(&self) -> Result<MachineState, DriverError>;

    async fn start(&self) -> Result<(), DriverError>;

    async fn stop(&self) -> Result<(), DriverError>;

    async fn remove(&self) -> Result<(), DriverError>;

    async fn ssh_hostname(&self) -> Result<String, DriverError>;

    async fn ssh_port(&self) -> Result<u16, DriverError>;

    async fn ip(&self) -> Result<String, DriverError>;

    async fn url(&self) -> Result<String, DriverError>;

    async fn engine_version(&self) -> Result<String, DriverError>;
}
