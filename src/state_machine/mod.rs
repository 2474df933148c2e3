// Copyright (c) 2025 - Cowboy AI, Inc.
//! Finite State Machine Abstractions
//!
//! Transitions are pure functions from `(State, Input)` to `(State, Output)`:
//!
//! ```text
//! (State, Input) → (State, Output)
//! ```
//!
//! The output tells the caller which side effect to perform. The state
//! machine itself never calls a driver.
//!
//! # Example
//!
//! ```rust
//! use cim_machine::domain::{MachineState, PowerState};
//! use cim_machine::state_machine::{PowerAction, StateMachine};
//!
//! let (next, action) = MachineState::Stopped.transition(&PowerState::Running).unwrap();
//! assert_eq!(next, MachineState::Running);
//! assert_eq!(action, PowerAction::Start);
//! ```

pub mod power;

pub use power::{PowerAction, PowerTable};

use crate::domain::MachineState;

/// Result of a state transition
pub type TransitionResult<S> = Result<S, TransitionError>;

/// Errors that can occur during state transitions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// Fatal machine state; no transition is attempted
    #[error("Machine is in {0} state")]
    Terminal(MachineState),
}

/// Trait for finite state machines
pub trait StateMachine: Sized + Clone {
    /// Input type that triggers transitions
    type Input;

    /// Output type produced by transitions
    type Output;

    /// Attempt to transition to a new state given an input
    ///
    /// # Returns
    /// - Ok((new_state, output)) if transition is valid
    /// - Err(TransitionError) if transition is invalid
    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)>;

    /// Check if a transition is valid without performing it
    fn can_transition(&self, input: &Self::Input) -> bool {
        self.transition(input).is_ok()
    }
}
