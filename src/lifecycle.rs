// Copyright (c) 2025 - Cowboy AI, Inc.
//! Lifecycle Controller
//!
//! Drives a machine toward a requested power state. The decision comes from the
//! pure power state machine; this module performs the single driver call it
//! asks for and re-reads the state once afterwards.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::{MachineState, PowerState};
use crate::driver::{Driver, DriverOperation};
use crate::errors::{ReconcileError, ReconcileResult};
use crate::state_machine::{PowerAction, StateMachine};

/// Outcome of one convergence pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerTransition {
    /// State observed before acting
    pub from: MachineState,
    pub target: PowerState,
    pub action: PowerAction,
    /// State re-read after acting; authoritative for observed fields
    pub observed: MachineState,
    pub at: DateTime<Utc>,
}

impl PowerTransition {
    /// True when a Start or Stop was issued
    pub fn acted(&self) -> bool {
        self.action != PowerAction::Keep
    }
}

/// Query the driver's observed state
pub async fn query_state(driver: &dyn Driver) -> ReconcileResult<MachineState> {
    driver
        .state()
        .await
        .map_err(ReconcileError::driver(DriverOperation::State))
}

/// Bring a machine to `target`
///
/// Terminal states abort before any driver call. At most one Start or Stop is
/// issued, and the state is queried exactly once after the action (or no-op).
pub async fn converge(driver: &dyn Driver, target: PowerState) -> ReconcileResult<PowerTransition> {
    let from = query_state(driver).await?;

    let (_, action) = from.transition(&target).map_err(|e| {
        warn!("Cannot bring machine to {}: {}", target, e);
        ReconcileError::from(e)
    })?;

    match action {
        PowerAction::Start => {
            info!("Starting machine ({} → {})", from, target);
            driver
                .start()
                .await
                .map_err(ReconcileError::driver(DriverOperation::Start))?;
        }
        PowerAction::Stop => {
            info!("Stopping machine ({} → {})", from, target);
            driver
                .stop()
                .await
                .map_err(ReconcileError::driver(DriverOperation::Stop))?;
        }
        PowerAction::Keep => {
            debug!("Machine already {} for target {}", from, target);
        }
    }

    let observed = query_state(driver).await?;
    Ok(PowerTransition {
        from,
        target,
        action,
        observed,
        at: Utc::now(),
    })
}
