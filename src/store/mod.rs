// Copyright (c) 2025 - Cowboy AI, Inc.
//! Machine Store
//!
//! Persistent record of the machines this provider manages. A stored machine
//! is a [`HostRecord`] plus the driver instance rebuilt from its persisted
//! configuration.
//!
//! # Layout
//!
//! ```text
//! <base>/
//! ├── certs/                 default TLS material
//! └── machines/
//!     └── <name>/
//!         └── config.json    serialized HostRecord
//! ```
//!
//! Stores are shared by every resource type of one provider instance and are
//! safe to call from concurrent tasks.

pub mod file;

use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::{HostRecord, MachineName, MachineNameError};
use crate::driver::{Driver, DriverError};

pub use file::FileStore;

/// Machine store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Host does not exist: {0:?}")]
    NotFound(String),

    #[error("Driver {0:?} is not registered")]
    UnknownDriver(String),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Host record serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error(transparent)]
    InvalidName(#[from] MachineNameError),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A stored host together with its live driver
pub struct Machine {
    pub record: HostRecord,
    pub driver: Box<dyn Driver>,
}

impl Machine {
    pub fn name(&self) -> &str {
        self.record.name.as_str()
    }
}

impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("record", &self.record)
            .field("driver", &self.driver.driver_name())
            .finish()
    }
}

/// Persistence seam for machine records
#[async_trait]
pub trait MachineStore: Send + Sync {
    /// Whether `name` is acceptable as a machine name
    fn validate_hostname(&self, name: &str) -> bool {
        MachineName::is_valid(name)
    }

    async fn exists(&self, name: &str) -> StoreResult<bool>;

    /// Load a machine and rebuild its driver from the persisted configuration
    async fn load(&self, name: &str) -> StoreResult<Machine>;

    /// Build an unsaved host from a driver name and serialized driver config
    async fn new_host(
        &self,
        name: &str,
        driver_name: &str,
        driver_config: &[u8],
    ) -> StoreResult<Machine>;

    /// Persist a machine, including the driver's current configuration
    async fn save(&self, machine: &Machine) -> StoreResult<()>;

    async fn remove(&self, name: &str) -> StoreResult<()>;

    /// Base storage directory
    fn base_path(&self) -> &Path;

    /// Default certificate directory
    fn certs_dir(&self) -> &Path;
}
