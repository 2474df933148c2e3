// Copyright (c) 2025 - Cowboy AI, Inc.
//! Flag Translation
//!
//! Maps the generic attribute values of a [`ResourceDescriptor`] to the native
//! option bag a driver consumes at creation time.
//!
//! The option bag always covers the full flag key space: each flag starts from
//! its declared default (`false` when it has none) and is overridden by the
//! descriptor value stored under the normalized attribute name.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::{AttributeType, AttributeValue, CapabilityFlag, FlagKind, ResourceDescriptor};

/// Stored attribute value does not match its flag kind
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error("Flag {flag:?} of kind {kind} cannot take a {found} attribute value")]
    Mismatch {
        flag: String,
        kind: FlagKind,
        found: AttributeType,
    },
}

/// Driver-native creation options keyed by the driver's flag names
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverOptions {
    values: BTreeMap<String, Value>,
}

impl DriverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// String option; the `false` placeholder reads as unset
    pub fn string(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// String list option; anything but an array reads as empty
    pub fn string_list(&self, key: &str) -> Vec<String> {
        match self.values.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        self.values.get(key).and_then(Value::as_i64)
    }

    pub fn boolean(&self, key: &str) -> bool {
        self.values.get(key).and_then(Value::as_bool).unwrap_or(false)
    }
}

impl From<BTreeMap<String, Value>> for DriverOptions {
    fn from(values: BTreeMap<String, Value>) -> Self {
        Self { values }
    }
}

/// Translate a descriptor into the option bag for a driver's flags
pub fn to_driver_options(
    descriptor: &ResourceDescriptor,
    flags: &[CapabilityFlag],
) -> Result<DriverOptions, TranslationError> {
    let mut options = DriverOptions::new();

    for flag in flags {
        let value = match descriptor.get(&flag.attribute_name()) {
            Some(stored) => stored_value(flag, stored)?,
            None => flag
                .default_value()
                .map(AttributeValue::to_json)
                .unwrap_or(Value::Bool(false)),
        };
        options.insert(flag.name(), value);
    }

    Ok(options)
}

fn stored_value(flag: &CapabilityFlag, stored: &AttributeValue) -> Result<Value, TranslationError> {
    let mismatch = || TranslationError::Mismatch {
        flag: flag.name().to_string(),
        kind: flag.kind(),
        found: stored.attribute_type(),
    };

    match flag.kind() {
        FlagKind::String => match stored {
            AttributeValue::String(s) => Ok(Value::String(s.clone())),
            _ => Err(mismatch()),
        },
        FlagKind::StringList => match stored {
            AttributeValue::StringList(items) => Ok(Value::Array(
                items.iter().cloned().map(Value::String).collect(),
            )),
            _ => Err(mismatch()),
        },
        FlagKind::Integer => match stored {
            AttributeValue::Integer(i) => Ok(Value::from(*i)),
            _ => Err(mismatch()),
        },
        FlagKind::Boolean => match stored {
            AttributeValue::Boolean(b) => Ok(Value::Bool(*b)),
            _ => Err(mismatch()),
        },
    }
}
