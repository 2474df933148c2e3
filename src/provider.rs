// Copyright (c) 2025 - Cowboy AI, Inc.
//! Machine Provider
//!
//! Entry point for the host framework. One provider instance owns the shared
//! machine store and registers a `machine_<driver>` resource type for every
//! driver in its registry, each with a schema synthesized from that driver's
//! capability flags.

use serde_json::json;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::ProviderConfig;
use crate::domain::{AttributeValue, ResourceDescriptor};
use crate::driver::{introspect, DriverRegistry};
use crate::errors::{ReconcileError, ReconcileResult};
use crate::reconciler::Reconciler;
use crate::schema::{self, builtin, AttributeSchema, SchemaError};
use crate::store::{FileStore, MachineStore};

/// Resource type name for a driver
pub fn resource_type(driver_name: &str) -> String {
    format!("machine_{driver_name}")
}

/// One registered resource type: its schema and its reconciler
#[derive(Debug, Clone)]
pub struct MachineResource {
    schema: AttributeSchema,
    reconciler: Reconciler,
}

impl MachineResource {
    pub fn schema(&self) -> &AttributeSchema {
        &self.schema
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    /// Validate configuration and provision the machine
    pub async fn create(
        &self,
        config: BTreeMap<String, AttributeValue>,
    ) -> ReconcileResult<ResourceDescriptor> {
        let mut descriptor = self
            .schema
            .descriptor(config)
            .map_err(ReconcileError::InvalidConfig)?;
        self.reconciler.create(&mut descriptor).await?;
        descriptor.commit();
        Ok(descriptor)
    }

    pub async fn read(&self, descriptor: &mut ResourceDescriptor) -> ReconcileResult<()> {
        self.reconciler.read(descriptor).await?;
        descriptor.commit();
        Ok(())
    }

    /// Plan new configuration against the persisted descriptor and apply it
    pub async fn update(
        &self,
        prior: &ResourceDescriptor,
        config: BTreeMap<String, AttributeValue>,
    ) -> ReconcileResult<ResourceDescriptor> {
        let mut descriptor = self
            .schema
            .plan_update(prior, config)
            .map_err(ReconcileError::InvalidConfig)?;
        self.reconciler.update(&mut descriptor).await?;
        descriptor.commit();
        Ok(descriptor)
    }

    pub async fn delete(&self, descriptor: &mut ResourceDescriptor) -> ReconcileResult<()> {
        self.reconciler.delete(descriptor).await
    }

    pub async fn exists(&self, descriptor: &mut ResourceDescriptor) -> ReconcileResult<bool> {
        self.reconciler.exists(descriptor).await
    }
}

/// Provider holding every machine resource type
#[derive(Clone)]
pub struct Provider {
    config: ProviderConfig,
    store: Arc<dyn MachineStore>,
    resources: BTreeMap<String, MachineResource>,
}

impl Provider {
    /// Provider backed by a [`FileStore`] at the configured storage path
    pub fn new(config: ProviderConfig, registry: DriverRegistry) -> ReconcileResult<Self> {
        let registry = Arc::new(registry);
        let store: Arc<dyn MachineStore> = Arc::new(FileStore::new(
            config.storage_path.clone(),
            config.certs_directory.clone(),
            Arc::clone(&registry),
        ));
        Self::with_store(config, registry, store)
    }

    /// Provider over an existing store
    pub fn with_store(
        config: ProviderConfig,
        registry: Arc<DriverRegistry>,
        store: Arc<dyn MachineStore>,
    ) -> ReconcileResult<Self> {
        let mut resources = BTreeMap::new();

        for driver_name in registry.names() {
            let probe = registry
                .instantiate(driver_name, "", &config.storage_path)
                .ok_or_else(|| ReconcileError::UnknownDriver(driver_name.to_string()))?;
            let flags = introspect(probe.as_ref()).map_err(SchemaError::from)?;
            let schema = schema::synthesize(&flags);

            debug!(
                "Registered {} with {} attributes",
                resource_type(driver_name),
                schema.len()
            );

            let reconciler = Reconciler::new(
                driver_name,
                flags,
                Arc::clone(&store),
                Arc::clone(&registry),
            )
            .with_crash_settle_delay(config.crash_settle_delay);
            resources.insert(
                resource_type(driver_name),
                MachineResource { schema, reconciler },
            );
        }

        info!(
            "Machine provider ready at {} ({} resource types)",
            config.storage_path.display(),
            resources.len()
        );

        Ok(Self {
            config,
            store,
            resources,
        })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn MachineStore> {
        &self.store
    }

    pub fn resource(&self, resource_type: &str) -> Option<&MachineResource> {
        self.resources.get(resource_type)
    }

    pub fn resources(&self) -> impl Iterator<Item = (&str, &MachineResource)> {
        self.resources.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Schema of the provider block itself
    pub fn provider_schema() -> AttributeSchema {
        AttributeSchema::from_attributes(builtin::provider_attributes())
    }

    /// Provider and resource schemas as one JSON document
    pub fn schema_document(&self) -> serde_json::Value {
        let resources: BTreeMap<&str, &AttributeSchema> = self
            .resources
            .iter()
            .map(|(name, resource)| (name.as_str(), &resource.schema))
            .collect();

        json!({
            "provider": Self::provider_schema(),
            "resources": resources,
        })
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("config", &self.config)
            .field("resources", &self.resources.keys().collect::<Vec<_>>())
            .finish()
    }
}
