// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Descriptor
//!
//! Live configuration plus observed state for one managed machine. The
//! descriptor keeps two attribute maps:
//!
//! - `attributes`: the values the current reconciliation pass works with
//!   (planned configuration, then observed values written back)
//! - `persisted`: the snapshot the host framework last stored, used for change
//!   detection
//!
//! Typed getters fall back to the zero value of their type when an attribute is
//! unset and fail only when a stored value has the wrong representation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::{AttributeType, AttributeValue};

/// Attribute lookup error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttributeError {
    #[error("Missing required attribute {0:?}")]
    Missing(String),

    #[error("Attribute {attribute:?} holds a {found} value, expected {expected}")]
    Mismatch {
        attribute: String,
        expected: AttributeType,
        found: AttributeType,
    },
}

/// Configuration and observed state of one machine resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    #[serde(default)]
    attributes: BTreeMap<String, AttributeValue>,

    #[serde(default)]
    persisted: BTreeMap<String, AttributeValue>,
}

impl ResourceDescriptor {
    /// Descriptor for a resource that has never been persisted
    pub fn new(attributes: BTreeMap<String, AttributeValue>) -> Self {
        Self {
            id: None,
            attributes,
            persisted: BTreeMap::new(),
        }
    }

    /// Descriptor rebuilt from previously persisted state
    pub fn from_persisted(
        id: impl Into<String>,
        attributes: BTreeMap<String, AttributeValue>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            persisted: attributes.clone(),
            attributes,
        }
    }

    /// Replace the working attributes while keeping the persisted snapshot
    pub fn with_planned(mut self, planned: BTreeMap<String, AttributeValue>) -> Self {
        self.attributes = planned;
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Mark the resource as gone so the host framework stops tracking it
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    pub fn set(&mut self, key: &str, value: impl Into<AttributeValue>) {
        self.attributes.insert(key.to_string(), value.into());
    }

    pub fn clear(&mut self, key: &str) {
        self.attributes.remove(key);
    }

    pub fn attributes(&self) -> &BTreeMap<String, AttributeValue> {
        &self.attributes
    }

    pub fn persisted(&self) -> &BTreeMap<String, AttributeValue> {
        &self.persisted
    }

    /// True when the working value differs from the persisted snapshot
    pub fn has_change(&self, key: &str) -> bool {
        self.attributes.get(key) != self.persisted.get(key)
    }

    /// Record the working attributes as persisted
    pub fn commit(&mut self) {
        self.persisted = self.attributes.clone();
    }

    /// The `name` attribute, which is the resource identity
    pub fn name(&self) -> Result<&str, AttributeError> {
        self.string("name")?
            .ok_or_else(|| AttributeError::Missing("name".to_string()))
    }

    pub fn string(&self, key: &str) -> Result<Option<&str>, AttributeError> {
        match self.attributes.get(key) {
            None => Ok(None),
            Some(AttributeValue::String(s)) => Ok(Some(s)),
            Some(other) => Err(mismatch(key, AttributeType::String, other)),
        }
    }

    /// String attribute with the empty string treated as unset
    pub fn non_empty_string(&self, key: &str) -> Result<Option<String>, AttributeError> {
        Ok(self
            .string(key)?
            .filter(|s| !s.is_empty())
            .map(str::to_string))
    }

    pub fn string_list(&self, key: &str) -> Result<Vec<String>, AttributeError> {
        match self.attributes.get(key) {
            None => Ok(Vec::new()),
            Some(AttributeValue::StringList(items)) => Ok(items.clone()),
            Some(other) => Err(mismatch(key, AttributeType::StringList, other)),
        }
    }

    pub fn integer(&self, key: &str) -> Result<Option<i64>, AttributeError> {
        match self.attributes.get(key) {
            None => Ok(None),
            Some(AttributeValue::Integer(i)) => Ok(Some(*i)),
            Some(other) => Err(mismatch(key, AttributeType::Integer, other)),
        }
    }

    pub fn boolean(&self, key: &str) -> Result<bool, AttributeError> {
        match self.attributes.get(key) {
            None => Ok(false),
            Some(AttributeValue::Boolean(b)) => Ok(*b),
            Some(other) => Err(mismatch(key, AttributeType::Boolean, other)),
        }
    }
}

fn mismatch(key: &str, expected: AttributeType, found: &AttributeValue) -> AttributeError {
    AttributeError::Mismatch {
        attribute: key.to_string(),
        expected,
        found: found.attribute_type(),
    }
}
