// Copyright (c) 2025 - Cowboy AI, Inc.

use tracing::{info, instrument, warn};

use super::Reconciler;
use crate::domain::ResourceDescriptor;
use crate::errors::{ReconcileError, ReconcileResult};

impl Reconciler {
    /// Destroy the machine and forget its record
    ///
    /// Fails only if the store still reports the machine after removal.
    #[instrument(skip_all, fields(driver = %self.driver_name))]
    pub async fn delete(&self, descriptor: &mut ResourceDescriptor) -> ReconcileResult<()> {
        let machine = self.load(descriptor).await?;
        let name = machine.name().to_string();

        machine
            .driver
            .remove()
            .await
            .map_err(|source| ReconcileError::Remove {
                name: name.clone(),
                source,
            })?;

        if self.probe(&name).await? {
            self.store.remove(&name).await?;
        } else {
            warn!("Host {} vanished from the store before removal", name);
        }

        if self.probe(&name).await? {
            return Err(ReconcileError::StillPresent(name));
        }

        descriptor.clear_id();
        info!("Machine {} removed", name);
        Ok(())
    }

    /// Whether the machine is still tracked by the store
    ///
    /// When it is not, the descriptor's id is cleared so the host framework
    /// drops the resource.
    #[instrument(skip_all, fields(driver = %self.driver_name))]
    pub async fn exists(&self, descriptor: &mut ResourceDescriptor) -> ReconcileResult<bool> {
        let name = descriptor.name()?.to_string();
        let exists = self.probe(&name).await?;
        if !exists {
            descriptor.clear_id();
        }
        Ok(exists)
    }

    async fn probe(&self, name: &str) -> ReconcileResult<bool> {
        self.store
            .exists(name)
            .await
            .map_err(|source| ReconcileError::ExistenceCheck {
                name: name.to_string(),
                source,
            })
    }
}
