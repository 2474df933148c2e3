// Copyright (c) 2025 - Cowboy AI, Inc.
//! Generic Attribute Values
//!
//! Resource descriptors hold every attribute as an [`AttributeValue`]. The set of
//! representations is closed and mirrors the four capability flag kinds, so a
//! value's [`AttributeType`] can always be checked against its schema entry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of a schema attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    /// Single string
    String,
    /// Ordered list of strings
    StringList,
    /// Signed integer
    Integer,
    /// Boolean
    Boolean,
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeType::String => "string",
            AttributeType::StringList => "list of strings",
            AttributeType::Integer => "integer",
            AttributeType::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// A single attribute value held by a resource descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Boolean(bool),
    Integer(i64),
    String(String),
    StringList(Vec<String>),
}

impl AttributeValue {
    /// The attribute type this value inhabits
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            AttributeValue::Boolean(_) => AttributeType::Boolean,
            AttributeValue::Integer(_) => AttributeType::Integer,
            AttributeValue::String(_) => AttributeType::String,
            AttributeValue::StringList(_) => AttributeType::StringList,
        }
    }

    /// Convert into the JSON form used by driver option bags
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            AttributeValue::Boolean(b) => serde_json::Value::Bool(*b),
            AttributeValue::Integer(i) => serde_json::Value::from(*i),
            AttributeValue::String(s) => serde_json::Value::String(s.clone()),
            AttributeValue::StringList(items) => serde_json::Value::Array(
                items
                    .iter()
                    .cloned()
                    .map(serde_json::Value::String)
                    .collect(),
            ),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Boolean(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<u16> for AttributeValue {
    fn from(value: u16) -> Self {
        AttributeValue::Integer(i64::from(value))
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(value: Vec<String>) -> Self {
        AttributeValue::StringList(value)
    }
}
