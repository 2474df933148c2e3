// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provider Configuration
//!
//! Resolved from, in increasing precedence:
//! 1. Built-in defaults (`~/.docker/machine`, `<storage>/certs`)
//! 2. Environment variables
//! 3. Provider attributes set in the host framework configuration
//!
//! | Variable                  | Field             |
//! |---------------------------|-------------------|
//! | `MACHINE_STORAGE_PATH`    | `storage_path`    |
//! | `MACHINE_CERTS_DIRECTORY` | `certs_directory` |
//! | `MACHINE_DEBUG`           | `debug`           |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::domain::AttributeValue;
use crate::reconciler::DEFAULT_CRASH_SETTLE_DELAY;
use crate::schema::builtin::{self, CERTS_DIRECTORY, PROVIDER_DEBUG, STORAGE_PATH};
use crate::schema::{AttributeSchema, SchemaError};

pub const STORAGE_PATH_ENV: &str = "MACHINE_STORAGE_PATH";
pub const CERTS_DIRECTORY_ENV: &str = "MACHINE_CERTS_DIRECTORY";
pub const DEBUG_ENV: &str = "MACHINE_DEBUG";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot determine home directory for the default storage path")]
    NoHomeDirectory,

    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },

    #[error("Invalid provider configuration: {0}")]
    Attribute(#[from] SchemaError),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

/// Provider-wide settings shared by every machine resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base directory of the machine store
    pub storage_path: PathBuf,
    /// Default TLS material directory
    pub certs_directory: PathBuf,
    pub debug: bool,
    /// Pause before collecting diagnostics for a failed create
    pub crash_settle_delay: Duration,
}

impl Default for ProviderConfig {
    /// Rooted at `~/.docker/machine`, or `.docker/machine` relative to the
    /// working directory when there is no home directory
    fn default() -> Self {
        Self::new(home_storage_path().unwrap_or_else(|| PathBuf::from(".docker").join("machine")))
    }
}

impl ProviderConfig {
    /// Configuration rooted at `storage_path`
    pub fn new(storage_path: impl Into<PathBuf>) -> Self {
        let storage_path = storage_path.into();
        Self {
            certs_directory: storage_path.join("certs"),
            storage_path,
            debug: false,
            crash_settle_delay: DEFAULT_CRASH_SETTLE_DELAY,
        }
    }

    /// Defaults overlaid with the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_path = match lookup(STORAGE_PATH_ENV).filter(|v| !v.is_empty()) {
            Some(path) => PathBuf::from(path),
            None => home_storage_path().ok_or(ConfigError::NoHomeDirectory)?,
        };

        let mut config = Self::new(storage_path);
        if let Some(certs) = lookup(CERTS_DIRECTORY_ENV).filter(|v| !v.is_empty()) {
            config.certs_directory = PathBuf::from(certs);
        }
        if let Some(debug) = lookup(DEBUG_ENV) {
            config.debug = parse_flag(DEBUG_ENV, &debug)?;
        }
        Ok(config)
    }

    /// Overlay provider attributes from the host framework configuration
    ///
    /// A storage path override also moves the default certificate directory
    /// unless `certs_directory` is set explicitly.
    pub fn with_attributes(
        mut self,
        attributes: &BTreeMap<String, AttributeValue>,
    ) -> Result<Self, ConfigError> {
        AttributeSchema::from_attributes(builtin::provider_attributes()).validate(attributes)?;

        if let Some(AttributeValue::String(path)) = attributes.get(STORAGE_PATH) {
            if !path.is_empty() {
                self.storage_path = PathBuf::from(path);
                self.certs_directory = self.storage_path.join("certs");
            }
        }
        if let Some(AttributeValue::String(certs)) = attributes.get(CERTS_DIRECTORY) {
            if !certs.is_empty() {
                self.certs_directory = PathBuf::from(certs);
            }
        }
        if let Some(AttributeValue::Boolean(debug)) = attributes.get(PROVIDER_DEBUG) {
            self.debug = *debug;
        }
        Ok(self)
    }

    pub fn with_crash_settle_delay(mut self, delay: Duration) -> Self {
        self.crash_settle_delay = delay;
        self
    }
}

fn home_storage_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".docker").join("machine"))
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_environment_overrides() {
        let config = ProviderConfig::from_lookup(lookup(&[
            (STORAGE_PATH_ENV, "/srv/machine"),
            (DEBUG_ENV, "true"),
        ]))
        .unwrap();

        assert_eq!(config.storage_path, PathBuf::from("/srv/machine"));
        assert_eq!(config.certs_directory, PathBuf::from("/srv/machine/certs"));
        assert!(config.debug);
        assert_eq!(config.crash_settle_delay, Duration::from_secs(2));
    }

    #[test]
    fn test_explicit_certs_directory() {
        let config = ProviderConfig::from_lookup(lookup(&[
            (STORAGE_PATH_ENV, "/srv/machine"),
            (CERTS_DIRECTORY_ENV, "/etc/pki/docker"),
        ]))
        .unwrap();
        assert_eq!(config.certs_directory, PathBuf::from("/etc/pki/docker"));
    }

    #[test]
    fn test_invalid_debug_flag() {
        let result = ProviderConfig::from_lookup(lookup(&[
            (STORAGE_PATH_ENV, "/srv/machine"),
            (DEBUG_ENV, "maybe"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_provider_attributes_take_precedence() {
        let attributes = BTreeMap::from([
            (STORAGE_PATH.to_string(), AttributeValue::from("/data/machine")),
            (PROVIDER_DEBUG.to_string(), AttributeValue::from(true)),
        ]);
        let config = ProviderConfig::new("/srv/machine")
            .with_attributes(&attributes)
            .unwrap();

        assert_eq!(config.storage_path, PathBuf::from("/data/machine"));
        assert_eq!(config.certs_directory, PathBuf::from("/data/machine/certs"));
        assert!(config.debug);
    }

    #[test]
    fn test_default_is_rooted_under_docker_machine() {
        let config = ProviderConfig::default();

        assert!(config.storage_path.ends_with(".docker/machine"));
        assert_eq!(config.certs_directory, config.storage_path.join("certs"));
        assert!(!config.debug);
        assert_eq!(config.crash_settle_delay, DEFAULT_CRASH_SETTLE_DELAY);
    }

    #[test]
    fn test_deserialize_fills_missing_fields_from_default() {
        let config: ProviderConfig = serde_json::from_value(serde_json::json!({
            "storage_path": "/srv/machine",
            "certs_directory": "/srv/machine/certs",
            "debug": true,
        }))
        .unwrap();

        assert_eq!(
            config,
            ProviderConfig {
                debug: true,
                ..ProviderConfig::new("/srv/machine")
            }
        );
    }

    #[test]
    fn test_unknown_provider_attribute() {
        let attributes = BTreeMap::from([("region".to_string(), AttributeValue::from("x"))]);
        assert!(matches!(
            ProviderConfig::new("/srv/machine").with_attributes(&attributes),
            Err(ConfigError::Attribute(SchemaError::UnknownAttribute(_)))
        ));
    }
}
