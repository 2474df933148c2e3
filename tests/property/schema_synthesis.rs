// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Schema Synthesis

use proptest::prelude::*;

use cim_machine::domain::{normalize_flag_name, AttributeType, AttributeValue};
use cim_machine::schema::{builtin, synthesize};

use super::strategies::{capability_set, flag_name, flags, Declared};

proptest! {
    /// Property: every flag becomes an optional, force-new attribute of the
    /// matching type with the right default
    #[test]
    fn prop_every_flag_has_typed_attribute(set in capability_set()) {
        let schema = synthesize(&flags(&set));

        for (name, declared) in &set {
            let spec = schema.get(&normalize_flag_name(name)).unwrap();
            prop_assert!(spec.optional && spec.force_new && !spec.computed);

            let (kind, default) = match declared {
                Declared::String(d) => {
                    (AttributeType::String, d.clone().map(AttributeValue::String))
                }
                Declared::StringList => (AttributeType::StringList, None),
                Declared::Integer(d) => (AttributeType::Integer, d.map(AttributeValue::Integer)),
                Declared::Boolean => (AttributeType::Boolean, Some(AttributeValue::Boolean(false))),
            };
            prop_assert_eq!(spec.kind, kind);
            prop_assert_eq!(&spec.default, &default);
        }
    }

    /// Property: synthesis only adds flag attributes to the built-ins
    #[test]
    fn prop_schema_size_is_builtins_plus_flags(set in capability_set()) {
        let schema = synthesize(&flags(&set));
        prop_assert_eq!(schema.len(), builtin::resource_attributes().len() + set.len());
    }

    /// Property: synthesis is deterministic
    #[test]
    fn prop_synthesis_is_deterministic(set in capability_set()) {
        let flags = flags(&set);
        prop_assert_eq!(synthesize(&flags), synthesize(&flags));
    }

    /// Property: normalization replaces every separator and nothing else
    #[test]
    fn prop_normalization_replaces_all_separators(name in flag_name()) {
        let normalized = normalize_flag_name(&name);

        prop_assert!(!normalized.contains('-'));
        prop_assert_eq!(normalized.len(), name.len());
        for (original, mapped) in name.chars().zip(normalized.chars()) {
            if original == '-' {
                prop_assert_eq!(mapped, '_');
            } else {
                prop_assert_eq!(mapped, original);
            }
        }
    }
}
