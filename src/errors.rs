// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for machine reconciliation

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{AttributeError, InvalidPowerState};
use crate::driver::{DriverError, DriverOperation};
use crate::schema::SchemaError;
use crate::state_machine::TransitionError;
use crate::store::StoreError;
use crate::translate::TranslationError;

/// Errors that can occur while reconciling a machine resource
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Machine name fails hostname rules; nothing was touched
    #[error("Invalid hostname: {0:?}")]
    InvalidHostname(String),

    /// User configuration rejected by the resource schema
    #[error("Invalid configuration: {0}")]
    InvalidConfig(SchemaError),

    /// Driver capabilities cannot be turned into a schema
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Host already exists: {0:?}")]
    HostAlreadyExists(String),

    /// Store still reports the machine after it was removed
    #[error("Host {0:?} still exists after removal")]
    StillPresent(String),

    #[error("Error attempting to check if host {name:?} exists: {source}")]
    ExistenceCheck {
        name: String,
        #[source]
        source: StoreError,
    },

    #[error("Error attempting to save host {name:?} to store: {source}")]
    Save {
        name: String,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Error attempting to {operation}: {source}")]
    Driver {
        operation: DriverOperation,
        #[source]
        source: DriverError,
    },

    #[error("Error setting machine configuration from flags provided: {0}")]
    Configure(#[source] DriverError),

    #[error("Error removing host {name:?}: {source}")]
    Remove {
        name: String,
        #[source]
        source: DriverError,
    },

    #[error(transparent)]
    Crash(#[from] CrashReport),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("Internal flag translation error: {0}")]
    Translation(#[from] TranslationError),

    #[error(transparent)]
    Attribute(#[from] AttributeError),

    #[error(transparent)]
    InvalidPowerState(#[from] InvalidPowerState),

    #[error("Driver configuration serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Driver {0:?} is not registered")]
    UnknownDriver(String),
}

impl ReconcileError {
    pub(crate) fn driver(operation: DriverOperation) -> impl FnOnce(DriverError) -> Self {
        move |source| ReconcileError::Driver { operation, source }
    }
}

/// Result type for reconciliation
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Driver create failure with diagnostic context
#[derive(Debug, Error)]
#[error(
    "{command} failed on {driver_name} driver ({context}): {cause}{}",
    log_hint(.log_file_path)
)]
pub struct CrashReport {
    #[source]
    pub cause: DriverError,
    /// Name of the failed operation
    pub command: String,
    /// Call site within the reconciler
    pub context: String,
    pub driver_name: String,
    /// Driver log worth reading, for drivers that write one
    pub log_file_path: Option<PathBuf>,
}

fn log_hint(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|path| format!(" (see {})", path.display()))
        .unwrap_or_default()
}
