// Copyright (c) 2025 - Cowboy AI, Inc.

use tracing::{error, info, instrument};

use super::{host_options, observe, target_state, HostPaths, Reconciler};
use crate::domain::ResourceDescriptor;
use crate::errors::{CrashReport, ReconcileError, ReconcileResult};
use crate::lifecycle;
use crate::schema::builtin::{SSH_KEYPATH, SSH_USERNAME};
use crate::translate::to_driver_options;

impl Reconciler {
    /// Provision a new machine and bring it to the requested power state
    ///
    /// # Errors
    /// - `InvalidHostname` before any store or driver call
    /// - `HostAlreadyExists` without calling the driver
    /// - `Crash` when the driver fails to create the machine
    #[instrument(skip_all, fields(driver = %self.driver_name))]
    pub async fn create(&self, descriptor: &mut ResourceDescriptor) -> ReconcileResult<()> {
        let name = descriptor.name()?.to_string();
        if !self.store.validate_hostname(&name) {
            return Err(ReconcileError::InvalidHostname(name));
        }
        let target = target_state(descriptor)?;

        let exists = self
            .store
            .exists(&name)
            .await
            .map_err(|source| ReconcileError::ExistenceCheck {
                name: name.clone(),
                source,
            })?;
        if exists {
            return Err(ReconcileError::HostAlreadyExists(name));
        }

        let blank = self.instantiate(&name)?;
        let raw = serde_json::to_vec(&blank.config().map_err(ReconcileError::Configure)?)?;
        let mut machine = self
            .store
            .new_host(&name, blank.driver_name(), &raw)
            .await?;

        let paths = HostPaths::resolve(
            descriptor,
            &name,
            self.store.base_path(),
            self.store.certs_dir(),
        )?;
        paths.record(descriptor);
        machine.record.options = host_options::assemble(descriptor, &paths)?;

        let options = to_driver_options(descriptor, &self.flags)?;
        machine
            .driver
            .set_config_from_flags(&options)
            .map_err(ReconcileError::Configure)?;

        info!("Creating machine {}", name);
        if let Err(cause) = machine.driver.create().await {
            tokio::time::sleep(self.crash_settle_delay).await;
            let report = CrashReport {
                cause,
                command: "Create".to_string(),
                context: "driver.create".to_string(),
                driver_name: self.driver_name.clone(),
                log_file_path: machine.driver.diagnostic_log(self.store.base_path(), &name),
            };
            error!("{}", report);
            return Err(report.into());
        }

        self.store
            .save(&machine)
            .await
            .map_err(|source| ReconcileError::Save {
                name: name.clone(),
                source,
            })?;

        descriptor.set(SSH_USERNAME, machine.driver.ssh_username());
        descriptor.set(SSH_KEYPATH, machine.driver.ssh_key_path());

        let transition = lifecycle::converge(machine.driver.as_ref(), target).await?;
        observe::refresh(descriptor, machine.driver.as_ref(), transition.observed).await?;

        descriptor.set_id(name.as_str());
        info!("Machine {} created ({})", name, transition.observed);
        Ok(())
    }
}
