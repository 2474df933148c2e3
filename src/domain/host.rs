// Copyright (c) 2025 - Cowboy AI, Inc.
//! Host Record
//!
//! The fully assembled description of a machine that is handed to a driver and
//! persisted by the machine store: identity, driver configuration, TLS material
//! locations, engine options and swarm membership.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::MachineName;

/// Persisted description of one provisioned machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostRecord {
    /// Machine identity
    pub name: MachineName,

    /// Name of the driver that provisions this machine
    pub driver_name: String,

    /// Driver-owned configuration, opaque to the reconciler
    #[serde(default)]
    pub driver: serde_json::Value,

    #[serde(default)]
    pub options: HostOptions,
}

impl HostRecord {
    pub fn new(
        name: MachineName,
        driver_name: impl Into<String>,
        driver: serde_json::Value,
    ) -> Self {
        Self {
            name,
            driver_name: driver_name.into(),
            driver,
            options: HostOptions::default(),
        }
    }
}

/// Grouped host options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostOptions {
    pub auth: AuthOptions,
    pub engine: EngineOptions,
    pub swarm: SwarmOptions,
}

/// TLS material locations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthOptions {
    pub cert_dir: PathBuf,
    pub store_path: PathBuf,
    pub ca_cert_path: PathBuf,
    pub ca_private_key_path: PathBuf,
    pub server_cert_path: PathBuf,
    pub server_key_path: PathBuf,
    pub client_cert_path: PathBuf,
    pub client_key_path: PathBuf,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub server_cert_sans: Vec<String>,
}

/// Container engine options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    #[serde(default)]
    pub arbitrary_flags: Vec<String>,
    #[serde(default)]
    pub env: Vec<String>,
    #[serde(default)]
    pub insecure_registry: Vec<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub registry_mirror: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_driver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_url: Option<String>,
    pub tls_verify: bool,
}

/// Cluster (swarm) membership options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwarmOptions {
    /// True when the machine is an agent or a master
    pub is_swarm: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub agent: bool,
    pub master: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(default)]
    pub arbitrary_flags: Vec<String>,
    #[serde(default)]
    pub arbitrary_join_flags: Vec<String>,
    pub is_experimental: bool,
}
