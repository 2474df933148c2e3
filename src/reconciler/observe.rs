// Copyright (c) 2025 - Cowboy AI, Inc.
//! Observed field refresh

use tracing::debug;

use crate::domain::{MachineState, ResourceDescriptor};
use crate::driver::{Driver, DriverOperation};
use crate::errors::{ReconcileError, ReconcileResult};
use crate::schema::builtin::{
    ADDRESS, CONNECTIVITY, ENDPOINT_URL, ENGINE_VERSION, SSH_HOSTNAME, SSH_PORT, STATE,
};

/// Connectivity details of a running machine
#[derive(Debug, Clone, PartialEq, Eq)]
struct Connectivity {
    ssh_hostname: String,
    ssh_port: u16,
    address: String,
    endpoint_url: String,
    engine_version: String,
}

async fn connectivity(driver: &dyn Driver) -> ReconcileResult<Connectivity> {
    Ok(Connectivity {
        ssh_hostname: driver
            .ssh_hostname()
            .await
            .map_err(ReconcileError::driver(DriverOperation::SshHostname))?,
        ssh_port: driver
            .ssh_port()
            .await
            .map_err(ReconcileError::driver(DriverOperation::SshPort))?,
        address: driver
            .ip()
            .await
            .map_err(ReconcileError::driver(DriverOperation::Address))?,
        endpoint_url: driver
            .url()
            .await
            .map_err(ReconcileError::driver(DriverOperation::EndpointUrl))?,
        engine_version: driver
            .engine_version()
            .await
            .map_err(ReconcileError::driver(DriverOperation::EngineVersion))?,
    })
}

/// Write observed fields for `state`
///
/// A running machine gets all five connectivity fields; any other state clears
/// them. `state` always receives the lower-cased observed state. Nothing is
/// written if a connectivity query fails.
pub async fn refresh(
    descriptor: &mut ResourceDescriptor,
    driver: &dyn Driver,
    state: MachineState,
) -> ReconcileResult<()> {
    if state.is_running() {
        let found = connectivity(driver).await?;
        descriptor.set(SSH_HOSTNAME, found.ssh_hostname);
        descriptor.set(SSH_PORT, found.ssh_port);
        descriptor.set(ADDRESS, found.address);
        descriptor.set(ENDPOINT_URL, found.endpoint_url);
        descriptor.set(ENGINE_VERSION, found.engine_version);
    } else {
        debug!("Machine is {:?}; clearing connectivity fields", state);
        for field in CONNECTIVITY {
            descriptor.clear(field);
        }
    }

    descriptor.set(STATE, state.to_attribute());
    Ok(())
}
