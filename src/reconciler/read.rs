// Copyright (c) 2025 - Cowboy AI, Inc.

use tracing::instrument;

use super::{observe, Reconciler};
use crate::domain::ResourceDescriptor;
use crate::errors::ReconcileResult;
use crate::lifecycle;

impl Reconciler {
    /// Refresh observed fields from the driver
    #[instrument(skip_all, fields(driver = %self.driver_name))]
    pub async fn read(&self, descriptor: &mut ResourceDescriptor) -> ReconcileResult<()> {
        let machine = self.load(descriptor).await?;
        let state = lifecycle::query_state(machine.driver.as_ref()).await?;
        observe::refresh(descriptor, machine.driver.as_ref(), state).await
    }
}
