// Copyright (c) 2025 - Cowboy AI, Inc.
//! Machine Name Value Object with Hostname Validation Invariants

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Machine name validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MachineNameError {
    #[error("Machine name is empty")]
    Empty,

    #[error("Machine name must start with a letter or digit: {0:?}")]
    InvalidLeadingCharacter(char),

    #[error("Invalid character in machine name: {0:?}")]
    InvalidCharacter(char),
}

/// Name of a provisioned machine
///
/// The name doubles as the resource identity and as the hostname handed to the
/// driver, so it follows the provisioning hostname rules:
/// - Non-empty
/// - First character is an ASCII letter or digit
/// - Remaining characters are ASCII letters, digits, `-` or `.`
///
/// # Examples
///
/// ```rust
/// use cim_machine::domain::MachineName;
///
/// assert!(MachineName::new("web01").is_ok());
/// assert!(MachineName::new("swarm-master.local").is_ok());
///
/// assert!(MachineName::new("").is_err());
/// assert!(MachineName::new("-leading").is_err());
/// assert!(MachineName::new("bad name!").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MachineName(String);

impl MachineName {
    /// Create a new machine name with validation
    pub fn new(name: impl Into<String>) -> Result<Self, MachineNameError> {
        let name = name.into();

        let mut chars = name.chars();
        let first = chars.next().ok_or(MachineNameError::Empty)?;
        if !first.is_ascii_alphanumeric() {
            return Err(MachineNameError::InvalidLeadingCharacter(first));
        }

        if let Some(ch) = chars.find(|ch| !Self::is_allowed(*ch)) {
            return Err(MachineNameError::InvalidCharacter(ch));
        }

        Ok(Self(name))
    }

    /// Check a name without allocating a value object
    pub fn is_valid(name: &str) -> bool {
        Self::new(name).is_ok()
    }

    fn is_allowed(ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '-' || ch == '.'
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the short name (first label before first dot)
    pub fn short_name(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for MachineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for MachineName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MachineName {
    type Error = MachineNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for MachineName {
    type Error = MachineNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MachineName> for String {
    fn from(name: MachineName) -> Self {
        name.0
    }
}
