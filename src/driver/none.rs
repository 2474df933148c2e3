// Copyright (c) 2025 - Cowboy AI, Inc.
//! Driver for pre-existing hosts
//!
//! Tracks a Docker endpoint that already runs somewhere. Nothing is provisioned
//! and the host cannot be powered on or off.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{Driver, DriverError};
use crate::domain::{FlagDescriptor, MachineState};
use crate::translate::DriverOptions;

pub const DRIVER_NAME: &str = "none";

const URL_FLAG: &str = "url";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct NoneConfig {
    machine_name: String,
    store_path: PathBuf,
    #[serde(rename = "URL")]
    url: String,
}

#[derive(Debug, Clone)]
pub struct NoneDriver {
    config: NoneConfig,
}

impl NoneDriver {
    pub fn new(machine: &str, store_path: &Path) -> Self {
        Self {
            config: NoneConfig {
                machine_name: machine.to_string(),
                store_path: store_path.to_path_buf(),
                url: String::new(),
            },
        }
    }

    fn host(&self) -> Result<String, DriverError> {
        url_host(&self.config.url)
            .map(str::to_string)
            .ok_or_else(|| {
                DriverError::InvalidConfig(format!("cannot parse url {:?}", self.config.url))
            })
    }
}

/// Host part of `scheme://[userinfo@]host[:port][/path]`
///
/// IPv6 literals come back without their brackets.
fn url_host(url: &str) -> Option<&str> {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next()?;
    let authority = authority.rsplit_once('@').map_or(authority, |(_, host)| host);

    let host = if let Some(bracketed) = authority.strip_prefix('[') {
        bracketed.split_once(']')?.0
    } else {
        match authority.rsplit_once(':') {
            Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
            _ => authority,
        }
    };
    (!host.is_empty()).then_some(host)
}

#[async_trait]
impl Driver for NoneDriver {
    fn driver_name(&self) -> &str {
        DRIVER_NAME
    }

    fn create_flags(&self) -> Vec<FlagDescriptor> {
        vec![FlagDescriptor::string(URL_FLAG, "").usage("URL of host when no driver is selected")]
    }

    fn set_config_from_flags(&mut self, options: &DriverOptions) -> Result<(), DriverError> {
        let url = options.string(URL_FLAG).unwrap_or_default();
        if url.is_empty() {
            return Err(DriverError::InvalidConfig(
                "--url option is required when no driver is selected".to_string(),
            ));
        }
        self.config.url = url.to_string();
        Ok(())
    }

    fn config(&self) -> Result<serde_json::Value, DriverError> {
        Ok(serde_json::to_value(&self.config)?)
    }

    fn load_config(&mut self, config: serde_json::Value) -> Result<(), DriverError> {
        self.config = serde_json::from_value(config)?;
        Ok(())
    }

    fn ssh_username(&self) -> String {
        "root".to_string()
    }

    fn ssh_key_path(&self) -> String {
        self.config
            .store_path
            .join("machines")
            .join(&self.config.machine_name)
            .join("id_rsa")
            .display()
            .to_string()
    }

    async fn create(&self) -> Result<(), DriverError> {
        Ok(())
    }

    async fn state(&self) -> Result<MachineState, DriverError> {
        Ok(MachineState::Running)
    }

    async fn start(&self) -> Result<(), DriverError> {
        Err(DriverError::Unsupported(
            "hosts without a driver cannot be started".to_string(),
        ))
    }

    async fn stop(&self) -> Result<(), DriverError> {
        Err(DriverError::Unsupported(
            "hosts without a driver cannot be stopped".to_string(),
        ))
    }

    async fn remove(&self) -> Result<(), DriverError> {
        Ok(())
    }

    async fn ssh_hostname(&self) -> Result<String, DriverError> {
        self.ip().await
    }

    async fn ssh_port(&self) -> Result<u16, DriverError> {
        Ok(22)
    }

    async fn ip(&self) -> Result<String, DriverError> {
        self.host()
    }

    async fn url(&self) -> Result<String, DriverError> {
        Ok(self.config.url.clone())
    }

    async fn engine_version(&self) -> Result<String, DriverError> {
        Ok(String::new())
    }
}
