// Copyright (c) 2025 - Cowboy AI, Inc.

use tracing::{debug, info, instrument};

use super::{observe, target_state, Reconciler};
use crate::domain::ResourceDescriptor;
use crate::errors::ReconcileResult;
use crate::lifecycle;
use crate::schema::builtin::STATE;

impl Reconciler {
    /// Apply a changed power state
    ///
    /// Every other attribute is `force_new`, so a change to `state` is the only
    /// thing an in-place update acts on.
    #[instrument(skip_all, fields(driver = %self.driver_name))]
    pub async fn update(&self, descriptor: &mut ResourceDescriptor) -> ReconcileResult<()> {
        let machine = self.load(descriptor).await?;

        if !descriptor.has_change(STATE) {
            debug!("State unchanged for {}", machine.name());
            return Ok(());
        }

        let target = target_state(descriptor)?;
        let transition = lifecycle::converge(machine.driver.as_ref(), target).await?;
        observe::refresh(descriptor, machine.driver.as_ref(), transition.observed).await?;

        info!(
            "Machine {} updated: {} → {} ({})",
            machine.name(),
            transition.from,
            transition.observed,
            transition.action
        );
        Ok(())
    }
}
