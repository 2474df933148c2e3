// Copyright (c) 2025 - Cowboy AI, Inc.
//! Filesystem Machine Store

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

use super::{Machine, MachineStore, StoreError, StoreResult};
use crate::domain::{HostRecord, MachineName};
use crate::driver::{Driver, DriverRegistry};

const CONFIG_FILE: &str = "config.json";

/// Stores one `config.json` per machine under `<base>/machines/<name>/`
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
    certs_dir: PathBuf,
    registry: Arc<DriverRegistry>,
}

impl FileStore {
    pub fn new(
        base_path: impl Into<PathBuf>,
        certs_dir: impl Into<PathBuf>,
        registry: Arc<DriverRegistry>,
    ) -> Self {
        Self {
            base_path: base_path.into(),
            certs_dir: certs_dir.into(),
            registry,
        }
    }

    fn machine_dir(&self, name: &str) -> PathBuf {
        self.base_path.join("machines").join(name)
    }

    fn config_path(&self, name: &str) -> PathBuf {
        self.machine_dir(name).join(CONFIG_FILE)
    }

    fn driver(&self, driver_name: &str, machine: &str) -> StoreResult<Box<dyn Driver>> {
        self.registry
            .instantiate(driver_name, machine, &self.base_path)
            .ok_or_else(|| StoreError::UnknownDriver(driver_name.to_string()))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[async_trait]
impl MachineStore for FileStore {
    async fn exists(&self, name: &str) -> StoreResult<bool> {
        let path = self.config_path(name);
        fs::try_exists(&path).await.map_err(io_error(&path))
    }

    async fn load(&self, name: &str) -> StoreResult<Machine> {
        let path = self.config_path(name);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(name.to_string()))
            }
            Err(e) => return Err(io_error(&path)(e)),
        };

        let record: HostRecord = serde_json::from_slice(&bytes)?;
        let mut driver = self.driver(&record.driver_name, name)?;
        driver.load_config(record.driver.clone())?;

        debug!("Loaded host {} ({})", name, record.driver_name);
        Ok(Machine { record, driver })
    }

    async fn new_host(
        &self,
        name: &str,
        driver_name: &str,
        driver_config: &[u8],
    ) -> StoreResult<Machine> {
        let machine_name = MachineName::new(name)?;
        let config: serde_json::Value = serde_json::from_slice(driver_config)?;

        let mut driver = self.driver(driver_name, name)?;
        driver.load_config(config.clone())?;

        Ok(Machine {
            record: HostRecord::new(machine_name, driver_name, config),
            driver,
        })
    }

    async fn save(&self, machine: &Machine) -> StoreResult<()> {
        let dir = self.machine_dir(machine.name());
        fs::create_dir_all(&dir).await.map_err(io_error(&dir))?;

        let mut record = machine.record.clone();
        record.driver = machine.driver.config()?;

        let path = dir.join(CONFIG_FILE);
        let bytes = serde_json::to_vec_pretty(&record)?;
        fs::write(&path, bytes).await.map_err(io_error(&path))?;

        debug!("Saved host {} to {}", machine.name(), path.display());
        Ok(())
    }

    async fn remove(&self, name: &str) -> StoreResult<()> {
        let dir = self.machine_dir(name);
        match fs::remove_dir_all(&dir).await {
            Ok(()) => {
                info!("Removed host {} from store", name);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&dir)(e)),
        }
    }

    fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn certs_dir(&self) -> &Path {
        &self.certs_dir
    }
}
