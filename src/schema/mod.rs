// Copyright (c) 2025 - Cowboy AI, Inc.
//! Attribute Schema Synthesis
//!
//! Every driver type gets its own resource schema: the fixed built-in
//! attributes (identity, TLS paths, engine and swarm options, observed fields)
//! plus one attribute per capability flag the driver declares.
//!
//! # Flag Mapping
//!
//! | Flag kind    | Attribute type  | Default              |
//! |--------------|-----------------|----------------------|
//! | `String`     | string          | flag default         |
//! | `StringList` | list of strings | none                 |
//! | `Integer`    | integer         | flag default         |
//! | `Boolean`    | boolean         | `false`              |
//!
//! All flag attributes are optional and `force_new`. Flag names are
//! normalized (`-` → `_`) and never override a built-in of the same name.
//!
//! A schema is immutable once synthesized; the only way to build one is
//! [`synthesize`].

pub mod builtin;

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::{
    AttributeType, AttributeValue, CapabilityFlag, FlagError, FlagKind, ResourceDescriptor,
};

/// Schema synthesis and validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Driver declared a flag this crate cannot represent
    #[error(transparent)]
    Flag(#[from] FlagError),

    #[error("Missing required attribute {0:?}")]
    MissingRequired(String),

    #[error("Unknown attribute {0:?}")]
    UnknownAttribute(String),

    #[error("Attribute {0:?} is computed and cannot be set")]
    ComputedAttribute(String),

    #[error("Attribute {attribute:?} expects a {expected} value, got {found}")]
    TypeMismatch {
        attribute: String,
        expected: AttributeType,
        found: AttributeType,
    },

    #[error("Attribute {attribute:?} must be one of {allowed:?}, got {value:?}")]
    NotAllowed {
        attribute: String,
        allowed: Vec<String>,
        value: String,
    },
}

/// Declaration of a single resource attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeSpec {
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    /// A change requires destroying and recreating the machine
    pub force_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<AttributeValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl AttributeSpec {
    fn base(kind: AttributeType) -> Self {
        Self {
            kind,
            required: false,
            optional: false,
            computed: false,
            force_new: false,
            default: None,
            allowed_values: Vec::new(),
            description: String::new(),
        }
    }

    pub fn required(kind: AttributeType) -> Self {
        Self {
            required: true,
            ..Self::base(kind)
        }
    }

    pub fn optional(kind: AttributeType) -> Self {
        Self {
            optional: true,
            ..Self::base(kind)
        }
    }

    /// Observed attribute, never user-settable
    pub fn computed(kind: AttributeType) -> Self {
        Self {
            computed: true,
            ..Self::base(kind)
        }
    }

    /// User-settable attribute that the reconciler fills in when left unset
    pub fn optional_computed(kind: AttributeType) -> Self {
        Self {
            optional: true,
            computed: true,
            ..Self::base(kind)
        }
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<AttributeValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn one_of(mut self, values: &[&str]) -> Self {
        self.allowed_values = values.iter().map(|v| v.to_string()).collect();
        self
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn is_user_settable(&self) -> bool {
        self.required || self.optional
    }
}

/// Complete attribute schema for one driver type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeSchema {
    attributes: BTreeMap<String, AttributeSpec>,
}

impl AttributeSchema {
    pub(crate) fn from_attributes(attributes: BTreeMap<String, AttributeSpec>) -> Self {
        Self { attributes }
    }

    pub fn get(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeSpec)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Validate user-supplied configuration against the schema
    ///
    /// # Rules
    /// - Every key names a known, user-settable attribute
    /// - Values have the declared type
    /// - Restricted attributes hold one of their allowed values
    /// - Required attributes are present
    pub fn validate(&self, config: &BTreeMap<String, AttributeValue>) -> Result<(), SchemaError> {
        for (key, value) in config {
            let spec = self
                .get(key)
                .ok_or_else(|| SchemaError::UnknownAttribute(key.clone()))?;

            if !spec.is_user_settable() {
                return Err(SchemaError::ComputedAttribute(key.clone()));
            }

            if value.attribute_type() != spec.kind {
                return Err(SchemaError::TypeMismatch {
                    attribute: key.clone(),
                    expected: spec.kind,
                    found: value.attribute_type(),
                });
            }

            if !spec.allowed_values.is_empty() {
                let allowed = value
                    .as_str()
                    .map(|s| spec.allowed_values.iter().any(|a| a == s))
                    .unwrap_or(false);
                if !allowed {
                    return Err(SchemaError::NotAllowed {
                        attribute: key.clone(),
                        allowed: spec.allowed_values.clone(),
                        value: value.as_str().unwrap_or_default().to_string(),
                    });
                }
            }
        }

        for (name, spec) in self.iter() {
            if spec.required && !config.contains_key(name) {
                return Err(SchemaError::MissingRequired(name.to_string()));
            }
        }

        Ok(())
    }

    /// Build a fresh descriptor from user configuration, applying defaults
    pub fn descriptor(
        &self,
        config: BTreeMap<String, AttributeValue>,
    ) -> Result<ResourceDescriptor, SchemaError> {
        Ok(ResourceDescriptor::new(self.with_defaults(config)?))
    }

    /// Plan an update: persisted computed values carried over, user-settable
    /// values replaced by the new configuration
    pub fn plan_update(
        &self,
        prior: &ResourceDescriptor,
        config: BTreeMap<String, AttributeValue>,
    ) -> Result<ResourceDescriptor, SchemaError> {
        let config = self.with_defaults(config)?;

        let mut planned: BTreeMap<String, AttributeValue> = prior
            .attributes()
            .iter()
            .filter(|(key, _)| self.get(key).is_some_and(|spec| !spec.is_user_settable()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        // Optional+computed attributes keep their computed value unless set.
        for (key, value) in prior.attributes() {
            let keep = self
                .get(key)
                .is_some_and(|spec| spec.optional && spec.computed)
                && !config.contains_key(key);
            if keep {
                planned.insert(key.clone(), value.clone());
            }
        }

        planned.extend(config);
        Ok(prior.clone().with_planned(planned))
    }

    fn with_defaults(
        &self,
        mut config: BTreeMap<String, AttributeValue>,
    ) -> Result<BTreeMap<String, AttributeValue>, SchemaError> {
        self.validate(&config)?;
        for (name, spec) in self.iter() {
            if let Some(default) = &spec.default {
                config
                    .entry(name.to_string())
                    .or_insert_with(|| default.clone());
            }
        }
        Ok(config)
    }
}

/// Attribute declaration for one capability flag
fn flag_attribute(flag: &CapabilityFlag) -> AttributeSpec {
    let spec = match flag.kind() {
        FlagKind::String => {
            let spec = AttributeSpec::optional(AttributeType::String).force_new();
            match flag.default_value() {
                Some(default) => spec.with_default(default.clone()),
                None => spec,
            }
        }
        FlagKind::StringList => AttributeSpec::optional(AttributeType::StringList).force_new(),
        FlagKind::Integer => {
            let spec = AttributeSpec::optional(AttributeType::Integer).force_new();
            match flag.default_value() {
                Some(default) => spec.with_default(default.clone()),
                None => spec,
            }
        }
        FlagKind::Boolean => AttributeSpec::optional(AttributeType::Boolean)
            .force_new()
            .with_default(false),
    };
    spec.describe(flag.description())
}

/// Synthesize the resource schema for a driver's capability flags
///
/// Pure and deterministic: the same flag list always yields the same schema.
pub fn synthesize(flags: &[CapabilityFlag]) -> AttributeSchema {
    let mut attributes = builtin::resource_attributes();
    for flag in flags {
        attributes
            .entry(flag.attribute_name())
            .or_insert_with(|| flag_attribute(flag));
    }
    AttributeSchema::from_attributes(attributes)
}
