// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Power State Convergence

use proptest::prelude::*;
use std::path::Path;

use cim_machine::domain::{MachineState, PowerState};
use cim_machine::driver::{Driver, NoneDriver};
use cim_machine::lifecycle::converge;
use cim_machine::state_machine::{PowerAction, PowerTable, StateMachine};
use cim_machine::DriverOptions;

use super::strategies::{machine_state, power_state};

proptest! {
    /// Property: an action is issued exactly when the state is a valid
    /// predecessor of the target
    #[test]
    fn prop_action_iff_predecessor(state in machine_state(), target in power_state()) {
        let entry = PowerTable::for_target(target);

        match state.transition(&target) {
            Err(_) => prop_assert!(state.is_terminal()),
            Ok((next, PowerAction::Keep)) => {
                prop_assert!(!entry.predecessors.contains(&state));
                prop_assert_eq!(next, state);
            }
            Ok((next, action)) => {
                prop_assert!(entry.predecessors.contains(&state));
                prop_assert_eq!(action, entry.action);
                prop_assert_eq!(next, entry.settles_in);
            }
        }
    }

    /// Property: once settled, the same target asks for nothing more
    #[test]
    fn prop_settled_state_is_stable(state in machine_state(), target in power_state()) {
        if let Ok((next, _)) = state.transition(&target) {
            prop_assert_eq!(next.transition(&target), Ok((next, PowerAction::Keep)));
        }
    }

    /// Property: a host without a driver is always running and never needs
    /// a power action
    #[test]
    fn prop_driverless_host_is_always_running(
        host in "[a-z]{1,10}(\\.[a-z]{2,5})?",
        port in 1u16..65535,
    ) {
        let mut driver = NoneDriver::new("edge1", Path::new("/tmp/machine"));
        let mut options = DriverOptions::new();
        options.insert("url", format!("tcp://{host}:{port}").into());
        driver.set_config_from_flags(&options).unwrap();

        let transition = tokio_test::block_on(converge(&driver, PowerState::Running)).unwrap();
        prop_assert_eq!(transition.action, PowerAction::Keep);
        prop_assert_eq!(transition.observed, MachineState::Running);
        prop_assert_eq!(tokio_test::block_on(driver.ip()).unwrap(), host);
    }
}
