// Copyright (c) 2025 - Cowboy AI, Inc.
//! Driver Capability Flags
//!
//! Drivers declare the options they accept at creation time as a list of raw
//! [`FlagDescriptor`]s (the shape they take on the driver wire). The capability
//! introspector turns each descriptor into a typed [`CapabilityFlag`], failing
//! fast on kinds or defaults this crate does not understand.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::AttributeValue;

/// Capability flag conversion error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlagError {
    #[error("Flag {flag:?} declares unknown kind {kind:?}")]
    UnknownKind { flag: String, kind: String },

    #[error("Flag {flag:?} of kind {kind} declares a default of the wrong type")]
    DefaultMismatch { flag: String, kind: FlagKind },

    #[error("Flag name is empty")]
    EmptyName,
}

/// Kind of a driver capability flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagKind {
    String,
    StringList,
    Integer,
    Boolean,
}

impl FlagKind {
    /// Wire name of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagKind::String => "string",
            FlagKind::StringList => "string_list",
            FlagKind::Integer => "integer",
            FlagKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlagKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(FlagKind::String),
            "string_list" | "string_slice" => Ok(FlagKind::StringList),
            "integer" | "int" => Ok(FlagKind::Integer),
            "boolean" | "bool" => Ok(FlagKind::Boolean),
            other => Err(other.to_string()),
        }
    }
}

/// Replace every separator in a flag name to form an attribute identifier
///
/// ```rust
/// use cim_machine::domain::normalize_flag_name;
///
/// assert_eq!(normalize_flag_name("amazonec2-instance-type"), "amazonec2_instance_type");
/// ```
pub fn normalize_flag_name(name: &str) -> String {
    name.replace('-', "_")
}

/// Raw flag declaration as reported by a driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagDescriptor {
    pub name: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(default)]
    pub usage: String,
    #[serde(default)]
    pub required: bool,
}

impl FlagDescriptor {
    fn new(name: &str, kind: FlagKind, value: Option<serde_json::Value>) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.as_str().to_string(),
            value,
            usage: String::new(),
            required: false,
        }
    }

    pub fn string(name: &str, default: &str) -> Self {
        Self::new(name, FlagKind::String, Some(default.into()))
    }

    pub fn string_list(name: &str) -> Self {
        Self::new(name, FlagKind::StringList, None)
    }

    pub fn integer(name: &str, default: i64) -> Self {
        Self::new(name, FlagKind::Integer, Some(default.into()))
    }

    pub fn boolean(name: &str) -> Self {
        Self::new(name, FlagKind::Boolean, None)
    }

    pub fn usage(mut self, usage: &str) -> Self {
        self.usage = usage.to_string();
        self
    }
}

/// Typed, validated driver capability flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityFlag {
    name: String,
    kind: FlagKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<AttributeValue>,
    description: String,
    required: bool,
}

impl CapabilityFlag {
    /// Create a flag without a default
    pub fn new(name: impl Into<String>, kind: FlagKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            description: String::new(),
            required: false,
        }
    }

    /// Attach a default, which must match the flag kind
    pub fn with_default(mut self, default: AttributeValue) -> Result<Self, FlagError> {
        let matches = matches!(
            (self.kind, &default),
            (FlagKind::String, AttributeValue::String(_))
                | (FlagKind::StringList, AttributeValue::StringList(_))
                | (FlagKind::Integer, AttributeValue::Integer(_))
                | (FlagKind::Boolean, AttributeValue::Boolean(_))
        );
        if !matches {
            return Err(FlagError::DefaultMismatch {
                flag: self.name,
                kind: self.kind,
            });
        }
        self.default = Some(default);
        Ok(self)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Driver-side flag name, used as the option bag key
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FlagKind {
        self.kind
    }

    pub fn default_value(&self) -> Option<&AttributeValue> {
        self.default.as_ref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Normalized attribute identifier for this flag
    pub fn attribute_name(&self) -> String {
        normalize_flag_name(&self.name)
    }
}

impl TryFrom<FlagDescriptor> for CapabilityFlag {
    type Error = FlagError;

    fn try_from(raw: FlagDescriptor) -> Result<Self, Self::Error> {
        if raw.name.is_empty() {
            return Err(FlagError::EmptyName);
        }

        let kind = raw.kind.parse::<FlagKind>().map_err(|kind| FlagError::UnknownKind {
            flag: raw.name.clone(),
            kind,
        })?;

        let mismatch = || FlagError::DefaultMismatch {
            flag: raw.name.clone(),
            kind,
        };

        let default = match (kind, raw.value) {
            (_, None) | (_, Some(serde_json::Value::Null)) => None,
            (FlagKind::String, Some(serde_json::Value::String(s))) => {
                Some(AttributeValue::String(s))
            }
            (FlagKind::Integer, Some(serde_json::Value::Number(n))) => {
                Some(AttributeValue::Integer(n.as_i64().ok_or_else(mismatch)?))
            }
            (FlagKind::Boolean, Some(serde_json::Value::Bool(b))) => {
                Some(AttributeValue::Boolean(b))
            }
            (FlagKind::StringList, Some(serde_json::Value::Array(items))) => {
                let items = items
                    .into_iter()
                    .map(|item| match item {
                        serde_json::Value::String(s) => Ok(s),
                        _ => Err(mismatch()),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Some(AttributeValue::StringList(items))
            }
            _ => return Err(mismatch()),
        };

        Ok(Self {
            name: raw.name,
            kind,
            default,
            description: raw.usage,
            required: raw.required,
        })
    }
}
