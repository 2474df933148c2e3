// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Flag Translation

use proptest::prelude::*;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use cim_machine::domain::{normalize_flag_name, AttributeValue, ResourceDescriptor};
use cim_machine::schema::synthesize;
use cim_machine::translate::to_driver_options;

use super::strategies::{capability_set, flags, Declared};

proptest! {
    /// Property: without user input every flag maps to its default, or
    /// `false` when it declares none
    #[test]
    fn prop_untouched_descriptor_yields_defaults(set in capability_set()) {
        let options = to_driver_options(&ResourceDescriptor::default(), &flags(&set)).unwrap();

        let expected: BTreeMap<String, Value> = set
            .iter()
            .map(|(name, declared)| {
                (name.clone(), declared.default_json().unwrap_or(Value::Bool(false)))
            })
            .collect();
        prop_assert_eq!(
            serde_json::to_value(&options).unwrap(),
            serde_json::to_value(&expected).unwrap()
        );
    }

    /// Property: the option bag covers exactly the flag key space
    #[test]
    fn prop_key_space_matches_flags(set in capability_set()) {
        let schema = synthesize(&flags(&set));
        let descriptor = schema
            .descriptor(BTreeMap::from([("name".to_string(), AttributeValue::from("vm1"))]))
            .unwrap();
        let options = to_driver_options(&descriptor, &flags(&set)).unwrap();

        let keys: BTreeSet<&str> = options.keys().collect();
        let names: BTreeSet<&str> = set.iter().map(|(name, _)| name.as_str()).collect();
        prop_assert_eq!(keys, names);
    }

    /// Property: schema defaults translate to the same options as no input
    #[test]
    fn prop_schema_defaults_agree_with_flag_defaults(set in capability_set()) {
        let flags = flags(&set);
        let descriptor = synthesize(&flags)
            .descriptor(BTreeMap::from([("name".to_string(), AttributeValue::from("vm1"))]))
            .unwrap();

        prop_assert_eq!(
            to_driver_options(&descriptor, &flags).unwrap(),
            to_driver_options(&ResourceDescriptor::default(), &flags).unwrap()
        );
    }

    /// Property: user values override defaults under the original flag name
    #[test]
    fn prop_user_values_reach_driver(
        set in capability_set(),
        text in "[a-z]{1,8}",
        number in 0i64..1000,
    ) {
        let mut descriptor = ResourceDescriptor::default();
        for (name, declared) in &set {
            let attribute = normalize_flag_name(name);
            match declared {
                Declared::String(_) => descriptor.set(&attribute, text.as_str()),
                Declared::StringList => descriptor.set(&attribute, vec![text.clone()]),
                Declared::Integer(_) => descriptor.set(&attribute, number),
                Declared::Boolean => descriptor.set(&attribute, true),
            }
        }

        let options = to_driver_options(&descriptor, &flags(&set)).unwrap();
        for (name, declared) in &set {
            match declared {
                Declared::String(_) => {
                    prop_assert_eq!(options.string(name), Some(text.as_str()));
                }
                Declared::StringList => {
                    prop_assert_eq!(options.string_list(name), vec![text.clone()]);
                }
                Declared::Integer(_) => {
                    prop_assert_eq!(options.integer(name), Some(number));
                }
                Declared::Boolean => {
                    prop_assert!(options.boolean(name));
                }
            }
        }
    }
}
