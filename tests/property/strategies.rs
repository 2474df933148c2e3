// Copyright (c) 2025 - Cowboy AI, Inc.
//! Shared proptest strategies for driver capability sets

use proptest::prelude::*;
use serde_json::Value;

use cim_machine::domain::{CapabilityFlag, FlagDescriptor, FlagKind, MachineState, PowerState};

/// Kind and optional default of one generated flag
#[derive(Debug, Clone)]
pub enum Declared {
    String(Option<String>),
    StringList,
    Integer(Option<i64>),
    Boolean,
}

impl Declared {
    pub fn kind(&self) -> FlagKind {
        match self {
            Declared::String(_) => FlagKind::String,
            Declared::StringList => FlagKind::StringList,
            Declared::Integer(_) => FlagKind::Integer,
            Declared::Boolean => FlagKind::Boolean,
        }
    }

    pub fn default_json(&self) -> Option<Value> {
        match self {
            Declared::String(default) => default.clone().map(Value::String),
            Declared::Integer(default) => default.map(Value::from),
            Declared::StringList | Declared::Boolean => None,
        }
    }

    pub fn descriptor(&self, name: &str) -> FlagDescriptor {
        FlagDescriptor {
            name: name.to_string(),
            kind: self.kind().as_str().to_string(),
            value: self.default_json(),
            usage: String::new(),
            required: false,
        }
    }
}

/// Driver-style flag name: `drv` followed by hyphenated segments
pub fn flag_name() -> impl Strategy<Value = String> {
    "drv(-[a-z0-9]{1,6}){1,3}"
}

pub fn declared() -> impl Strategy<Value = Declared> {
    prop_oneof![
        proptest::option::of("[a-z0-9./:]{0,12}").prop_map(Declared::String),
        Just(Declared::StringList),
        proptest::option::of(-4096i64..65536).prop_map(Declared::Integer),
        Just(Declared::Boolean),
    ]
}

/// A driver's capability set with unique flag names
pub fn capability_set() -> impl Strategy<Value = Vec<(String, Declared)>> {
    prop::collection::btree_map(flag_name(), declared(), 0..10)
        .prop_map(|flags| flags.into_iter().collect())
}

pub fn flags(set: &[(String, Declared)]) -> Vec<CapabilityFlag> {
    set.iter()
        .map(|(name, declared)| CapabilityFlag::try_from(declared.descriptor(name)).unwrap())
        .collect()
}

pub fn machine_state() -> impl Strategy<Value = MachineState> {
    prop::sample::select(MachineState::ALL.to_vec())
}

pub fn power_state() -> impl Strategy<Value = PowerState> {
    prop_oneof![Just(PowerState::Running), Just(PowerState::Stopped)]
}
