// Copyright (c) 2025 - Cowboy AI, Inc.
//! Observed Machine State and Desired Power State

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// State of a machine as reported by its driver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineState {
    /// Driver could not determine a state
    #[default]
    None,
    Running,
    Paused,
    Saved,
    Stopped,
    Stopping,
    Starting,
    /// Backend reported a failure (terminal for a reconciliation pass)
    Error,
    /// Backend did not answer in time (terminal for a reconciliation pass)
    Timeout,
}

impl MachineState {
    pub const ALL: [MachineState; 9] = [
        MachineState::None,
        MachineState::Running,
        MachineState::Paused,
        MachineState::Saved,
        MachineState::Stopped,
        MachineState::Stopping,
        MachineState::Starting,
        MachineState::Error,
        MachineState::Timeout,
    ];

    /// Display name of the state. `None` displays as the empty string.
    pub fn as_str(self) -> &'static str {
        match self {
            MachineState::None => "",
            MachineState::Running => "Running",
            MachineState::Paused => "Paused",
            MachineState::Saved => "Saved",
            MachineState::Stopped => "Stopped",
            MachineState::Stopping => "Stopping",
            MachineState::Starting => "Starting",
            MachineState::Error => "Error",
            MachineState::Timeout => "Timeout",
        }
    }

    /// Lower-cased display name, as written to the `state` attribute
    pub fn to_attribute(self) -> String {
        self.as_str().to_lowercase()
    }

    /// Error and Timeout abort a reconciliation pass
    pub fn is_terminal(self) -> bool {
        matches!(self, MachineState::Error | MachineState::Timeout)
    }

    pub fn is_running(self) -> bool {
        self == MachineState::Running
    }
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Power state requested by the operator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    #[default]
    Running,
    Stopped,
}

impl PowerState {
    /// Values accepted for the `state` attribute
    pub const ALLOWED: [&'static str; 2] = ["running", "stopped"];

    pub fn as_str(self) -> &'static str {
        match self {
            PowerState::Running => "running",
            PowerState::Stopped => "stopped",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested power state is not `running` or `stopped`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid power state {0:?}: expected \"running\" or \"stopped\"")]
pub struct InvalidPowerState(pub String);

impl FromStr for PowerState {
    type Err = InvalidPowerState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(PowerState::Running),
            "stopped" => Ok(PowerState::Stopped),
            other => Err(InvalidPowerState(other.to_string())),
        }
    }
}
