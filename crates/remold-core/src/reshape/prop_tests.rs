//! Property-based tests for the reshaping engine
//!
//! Copyright (c) 2026 Remold Team
//! Licensed under the Apache-2.0 license

use std::collections::BTreeSet;

use proptest::collection::vec;
use proptest::prelude::*;

use crate::error::Error;
use crate::options::ReshapeOptions;
use crate::output::Reshaped;
use crate::proptest_strategies::{mapping_strategy, schema_strategy, source_value_strategy};
use crate::schema::Schema;
use crate::value::SourceValue;

use super::reshape;

fn deep_mapping(levels: usize) -> SourceValue {
    let mut value = SourceValue::from("leaf");
    for _ in 0..levels {
        value = SourceValue::mapping([("a", value)]);
    }
    value
}

proptest! {
    #[test]
    fn nil_sources_always_produce_nothing(schema in schema_strategy()) {
        let result = reshape(&SourceValue::Null, &schema, &ReshapeOptions::default()).unwrap();
        prop_assert_eq!(result, None);
    }

    #[test]
    fn projections_never_leak_source_keys(
        source in mapping_strategy(),
        schema in schema_strategy(),
    ) {
        let result = reshape(&SourceValue::Mapping(source), &schema, &ReshapeOptions::default())
            .unwrap();

        if let Some(Reshaped::Map(projection)) = result {
            let declared: BTreeSet<&str> = schema.output_keys().collect();
            for key in projection.keys() {
                prop_assert!(declared.contains(key.as_str()));
            }
        }
    }

    #[test]
    fn sequence_sources_always_yield_sequences(
        items in vec(source_value_strategy(), 0..5),
        schema in schema_strategy(),
    ) {
        let result = reshape(&SourceValue::Sequence(items), &schema, &ReshapeOptions::default())
            .unwrap();

        match result {
            Some(Reshaped::Seq(elements)) => {
                let declared: BTreeSet<&str> = schema.output_keys().collect();
                for element in &elements {
                    for key in element.keys() {
                        prop_assert!(declared.contains(key.as_str()));
                    }
                }
            }
            other => prop_assert!(false, "expected a sequence, got {:?}", other),
        }
    }

    #[test]
    fn depth_limit_is_enforced(levels in 1usize..40) {
        let schema = Schema::new().map("a", "a");
        let options = ReshapeOptions::default().with_max_depth(8);

        let result = reshape(&deep_mapping(levels), &schema, &options);

        // `levels` mapping descents plus the leaf scalar must fit in the limit.
        if levels + 1 <= options.max_depth {
            prop_assert!(result.is_ok());
        } else {
            let is_depth_exceeded = matches!(result, Err(Error::DepthExceeded { .. }));
            prop_assert!(is_depth_exceeded);
        }
    }
}
