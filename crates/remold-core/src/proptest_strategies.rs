//! Property-based testing strategies for generating test data
//!
//! This module provides proptest strategies for generating random but valid
//! instances of core Remold types for property testing.

#![cfg(test)]

use std::collections::BTreeMap;

use proptest::collection::{btree_map, vec};
use proptest::prelude::*;

use crate::schema::Schema;
use crate::value::{Scalar, SourceValue};

/// Keys drawn from a tiny alphabet so sources and schemas collide often
pub fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e]"
}

/// Strategy for generating opaque scalars
pub fn scalar_strategy() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        any::<bool>().prop_map(Scalar::Bool),
        (-1000i64..1000).prop_map(Scalar::Int),
        (0u64..1000).prop_map(Scalar::UInt),
        (0i32..1000).prop_map(|n| Scalar::Float(f64::from(n))),
        "[a-z]{0,8}".prop_map(Scalar::Str),
        (0i64..4_000_000_000).prop_map(|secs| {
            Scalar::Timestamp(chrono::DateTime::from_timestamp(secs, 0).expect("in range"))
        }),
    ]
}

/// Strategy for generating source trees of bounded depth
pub fn source_value_strategy() -> impl Strategy<Value = SourceValue> {
    let leaf = prop_oneof![
        Just(SourceValue::Null),
        scalar_strategy().prop_map(SourceValue::Scalar),
    ];

    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            btree_map(key_strategy(), inner.clone(), 0..4).prop_map(SourceValue::Mapping),
            vec(inner.clone(), 0..4).prop_map(SourceValue::Sequence),
            vec(inner.clone(), 0..4).prop_map(SourceValue::Tuple),
            inner.prop_map(|value| SourceValue::Reference(Box::new(value))),
        ]
    })
}

/// Strategy for generating keyed-mapping sources
pub fn mapping_strategy() -> impl Strategy<Value = BTreeMap<String, SourceValue>> {
    btree_map(key_strategy(), source_value_strategy(), 0..5)
}

/// Strategy for generating flat schemas over the same key alphabet
pub fn schema_strategy() -> impl Strategy<Value = Schema> {
    btree_map(key_strategy(), key_strategy(), 0..5).prop_map(|entries| {
        entries
            .into_iter()
            .fold(Schema::new(), |schema, (output_key, source_key)| {
                schema.map(output_key, source_key)
            })
    })
}
