// Copyright (c) 2025 - Cowboy AI, Inc.
//! Machine Power State Machine
//!
//! # Transition Table
//!
//! | Target    | Valid predecessors                      | Action |
//! |-----------|-----------------------------------------|--------|
//! | `running` | Paused, Saved, Stopped, Stopping        | Start  |
//! | `stopped` | Running, Starting                       | Stop   |
//!
//! Any other non-terminal state is already where it needs to be (or on its
//! way there) and yields [`PowerAction::Keep`]. `Error` and `Timeout` are
//! terminal and reject every target.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{StateMachine, TransitionError, TransitionResult};
use crate::domain::{MachineState, PowerState};

/// Driver call required to move toward a power target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerAction {
    Start,
    Stop,
    Keep,
}

impl fmt::Display for PowerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            PowerAction::Start => "start",
            PowerAction::Stop => "stop",
            PowerAction::Keep => "keep",
        };
        f.write_str(action)
    }
}

/// Valid predecessor set per power target
#[derive(Debug, Clone, Copy)]
pub struct PowerTable {
    pub target: PowerState,
    pub predecessors: &'static [MachineState],
    pub action: PowerAction,
    /// State the machine settles in once the action succeeds
    pub settles_in: MachineState,
}

impl PowerTable {
    pub const ENTRIES: [PowerTable; 2] = [
        PowerTable {
            target: PowerState::Running,
            predecessors: &[
                MachineState::Paused,
                MachineState::Saved,
                MachineState::Stopped,
                MachineState::Stopping,
            ],
            action: PowerAction::Start,
            settles_in: MachineState::Running,
        },
        PowerTable {
            target: PowerState::Stopped,
            predecessors: &[MachineState::Running, MachineState::Starting],
            action: PowerAction::Stop,
            settles_in: MachineState::Stopped,
        },
    ];

    pub fn for_target(target: PowerState) -> &'static PowerTable {
        match target {
            PowerState::Running => &Self::ENTRIES[0],
            PowerState::Stopped => &Self::ENTRIES[1],
        }
    }

    /// Action that moves `current` toward this entry's target
    pub fn action_from(&self, current: MachineState) -> PowerAction {
        if self.predecessors.contains(&current) {
            self.action
        } else {
            PowerAction::Keep
        }
    }
}

impl StateMachine for MachineState {
    type Input = PowerState;
    type Output = PowerAction;

    fn transition(&self, target: &PowerState) -> TransitionResult<(Self, PowerAction)> {
        if self.is_terminal() {
            return Err(TransitionError::Terminal(*self));
        }

        let entry = PowerTable::for_target(*target);
        match entry.action_from(*self) {
            PowerAction::Keep => Ok((*self, PowerAction::Keep)),
            action => Ok((entry.settles_in, action)),
        }
    }
}
