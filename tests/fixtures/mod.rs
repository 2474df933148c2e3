// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-machine
//!
//! A scripted in-memory driver and a call-recording store wrapper around a
//! real [`FileStore`] in a temporary directory.
//!
//! # Design Principles
//! - Every driver call is recorded in order on a shared backend
//! - State queries answer from a script first, then from the simulated power state
//! - No real processes or network access

#![allow(dead_code)]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tempfile::TempDir;

use cim_machine::domain::{AttributeValue, FlagDescriptor, MachineState};
use cim_machine::driver::{Driver, DriverError, DriverRegistry};
use cim_machine::store::{FileStore, Machine, MachineStore, StoreError, StoreResult};
use cim_machine::{DriverOptions, MachineResource, Provider, ProviderConfig};

pub const MOCK_DRIVER: &str = "mock";
pub const MOCK_RESOURCE: &str = "machine_mock";

/// Simulated backend shared by every driver instance of one test
#[derive(Debug)]
pub struct Backend {
    pub calls: Vec<&'static str>,
    /// Answers for upcoming state queries, consumed in order
    pub script: VecDeque<MachineState>,
    pub power: MachineState,
    /// State a successful start leaves behind
    pub after_start: MachineState,
    pub fail_create: Option<String>,
    pub fail_remove: Option<String>,
    pub fail_ssh_port: Option<String>,
    pub applied: Option<DriverOptions>,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            script: VecDeque::new(),
            power: MachineState::None,
            after_start: MachineState::Running,
            fail_create: None,
            fail_remove: None,
            fail_ssh_port: None,
            applied: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MockConfig {
    machine_name: String,
    region: String,
}

pub struct MockDriver {
    backend: Arc<Mutex<Backend>>,
    config: MockConfig,
}

impl MockDriver {
    pub fn new(machine: &str, backend: Arc<Mutex<Backend>>) -> Self {
        Self {
            backend,
            config: MockConfig {
                machine_name: machine.to_string(),
                region: String::new(),
            },
        }
    }

    fn backend(&self) -> MutexGuard<'_, Backend> {
        self.backend.lock().unwrap()
    }

    fn record(&self, call: &'static str) -> MutexGuard<'_, Backend> {
        let mut backend = self.backend();
        backend.calls.push(call);
        backend
    }
}

#[async_trait]
impl Driver for MockDriver {
    fn driver_name(&self) -> &str {
        MOCK_DRIVER
    }

    fn create_flags(&self) -> Vec<FlagDescriptor> {
        vec![
            FlagDescriptor::string("mock-region", "local").usage("Simulated region"),
            FlagDescriptor::string_list("mock-tags"),
            FlagDescriptor::integer("mock-cpu-count", 1),
            FlagDescriptor::boolean("mock-nested-virt"),
        ]
    }

    fn set_config_from_flags(&mut self, options: &DriverOptions) -> Result<(), DriverError> {
        self.config.region = options.string("mock-region").unwrap_or_default().to_string();
        self.record("set_config").applied = Some(options.clone());
        Ok(())
    }

    fn config(&self) -> Result<serde_json::Value, DriverError> {
        Ok(serde_json::to_value(&self.config)?)
    }

    fn load_config(&mut self, config: serde_json::Value) -> Result<(), DriverError> {
        self.config = serde_json::from_value(config)?;
        Ok(())
    }

    fn diagnostic_log(&self, base_path: &Path, machine: &str) -> Option<PathBuf> {
        Some(
            base_path
                .join("machines")
                .join(machine)
                .join(machine)
                .join("Logs")
                .join("Mock.log"),
        )
    }

    fn ssh_username(&self) -> String {
        "docker".to_string()
    }

    fn ssh_key_path(&self) -> String {
        format!("/keys/{}/id_rsa", self.config.machine_name)
    }

    async fn create(&self) -> Result<(), DriverError> {
        let mut backend = self.record("create");
        if let Some(message) = backend.fail_create.clone() {
            return Err(DriverError::Backend(message));
        }
        backend.power = MachineState::Running;
        Ok(())
    }

    async fn state(&self) -> Result<MachineState, DriverError> {
        let mut backend = self.record("state");
        let power = backend.power;
        Ok(backend.script.pop_front().unwrap_or(power))
    }

    async fn start(&self) -> Result<(), DriverError> {
        let mut backend = self.record("start");
        backend.power = backend.after_start;
        Ok(())
    }

    async fn stop(&self) -> Result<(), DriverError> {
        self.record("stop").power = MachineState::Stopped;
        Ok(())
    }

    async fn remove(&self) -> Result<(), DriverError> {
        let mut backend = self.record("remove");
        if let Some(message) = backend.fail_remove.clone() {
            return Err(DriverError::Backend(message));
        }
        backend.power = MachineState::None;
        Ok(())
    }

    async fn ssh_hostname(&self) -> Result<String, DriverError> {
        self.record("ssh_hostname");
        Ok("192.168.99.100".to_string())
    }

    async fn ssh_port(&self) -> Result<u16, DriverError> {
        let backend = self.record("ssh_port");
        match &backend.fail_ssh_port {
            Some(message) => Err(DriverError::Backend(message.clone())),
            None => Ok(2222),
        }
    }

    async fn ip(&self) -> Result<String, DriverError> {
        self.record("ip");
        Ok("192.168.99.100".to_string())
    }

    async fn url(&self) -> Result<String, DriverError> {
        self.record("url");
        Ok("tcp://192.168.99.100:2376".to_string())
    }

    async fn engine_version(&self) -> Result<String, DriverError> {
        self.record("engine_version");
        Ok("24.0.7".to_string())
    }
}

/// Store wrapper recording every async call
pub struct RecordingStore {
    inner: FileStore,
    calls: Mutex<Vec<&'static str>>,
    /// Ignore removals, leaving the record in place
    pub sticky: Mutex<bool>,
    pub fail_exists: Mutex<bool>,
    pub fail_save: Mutex<bool>,
}

impl RecordingStore {
    pub fn new(inner: FileStore) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
            sticky: Mutex::new(false),
            fail_exists: Mutex::new(false),
            fail_save: Mutex::new(false),
        }
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn reset(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn io_failure(&self, name: &str) -> StoreError {
        StoreError::Io {
            path: self.inner.base_path().join("machines").join(name),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "store is read-only"),
        }
    }
}

#[async_trait]
impl MachineStore for RecordingStore {
    async fn exists(&self, name: &str) -> StoreResult<bool> {
        self.record("exists");
        if *self.fail_exists.lock().unwrap() {
            return Err(self.io_failure(name));
        }
        self.inner.exists(name).await
    }

    async fn load(&self, name: &str) -> StoreResult<Machine> {
        self.record("load");
        self.inner.load(name).await
    }

    async fn new_host(
        &self,
        name: &str,
        driver_name: &str,
        driver_config: &[u8],
    ) -> StoreResult<Machine> {
        self.record("new_host");
        self.inner.new_host(name, driver_name, driver_config).await
    }

    async fn save(&self, machine: &Machine) -> StoreResult<()> {
        self.record("save");
        if *self.fail_save.lock().unwrap() {
            return Err(self.io_failure(machine.name()));
        }
        self.inner.save(machine).await
    }

    async fn remove(&self, name: &str) -> StoreResult<()> {
        self.record("remove");
        if *self.sticky.lock().unwrap() {
            return Ok(());
        }
        self.inner.remove(name).await
    }

    fn base_path(&self) -> &Path {
        self.inner.base_path()
    }

    fn certs_dir(&self) -> &Path {
        self.inner.certs_dir()
    }
}

/// Provider wired to the mock driver and a temporary store
pub struct Harness {
    pub dir: TempDir,
    pub backend: Arc<Mutex<Backend>>,
    pub store: Arc<RecordingStore>,
    pub provider: Provider,
}

impl Harness {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(Mutex::new(Backend::default()));

        let shared = Arc::clone(&backend);
        let registry = Arc::new(
            DriverRegistry::with_core_drivers().register(MOCK_DRIVER, move |machine, _| {
                Box::new(MockDriver::new(machine, Arc::clone(&shared)))
            }),
        );

        let config = ProviderConfig::new(dir.path()).with_crash_settle_delay(Duration::ZERO);
        let store = Arc::new(RecordingStore::new(FileStore::new(
            config.storage_path.clone(),
            config.certs_directory.clone(),
            Arc::clone(&registry),
        )));
        let provider = Provider::with_store(config, registry, store.clone()).unwrap();

        Self {
            dir,
            backend,
            store,
            provider,
        }
    }

    pub fn resource(&self) -> &MachineResource {
        self.provider.resource(MOCK_RESOURCE).unwrap()
    }

    pub fn backend(&self) -> MutexGuard<'_, Backend> {
        self.backend.lock().unwrap()
    }

    pub fn driver_calls(&self) -> Vec<&'static str> {
        self.backend().calls.clone()
    }

    /// Forget recorded calls on both the driver and the store
    pub fn reset_calls(&self) {
        self.backend().calls.clear();
        self.store.reset();
    }

    pub fn script(&self, states: &[MachineState]) {
        self.backend().script.extend(states.iter().copied());
    }

    pub fn count(&self, call: &str) -> usize {
        self.driver_calls().iter().filter(|c| **c == call).count()
    }
}

/// Attribute map from literal pairs
pub fn config(pairs: &[(&str, AttributeValue)]) -> BTreeMap<String, AttributeValue> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// Minimal configuration for a machine named `name`
pub fn named(name: &str) -> BTreeMap<String, AttributeValue> {
    config(&[("name", name.into())])
}
