//! Keyed-mapping transformer
//!
//! Copyright (c) 2026 Remold Team
//! Licensed under the Apache-2.0 license

use std::collections::BTreeMap;

use crate::error::Result;
use crate::output::Projection;
use crate::schema::Schema;
use crate::value::SourceValue;

use super::context::ReshapeContext;
use super::transform_value;

/// Project a keyed mapping's entries through the schema
///
/// An entry's key is its externally-visible name, used directly. Iteration
/// order is not part of the contract. Nil-valued entries are skipped.
pub(super) fn transform_mapping(
    entries: &BTreeMap<String, SourceValue>,
    schema: &Schema,
    ctx: &ReshapeContext<'_>,
) -> Result<Projection> {
    let mut result = Projection::new();

    for (key, value) in entries {
        if value.is_null() {
            continue;
        }

        for (output_key, entry) in schema.matches(key) {
            let scope = entry.nested.as_ref().unwrap_or(schema);

            if let Some(reshaped) = transform_value(value, scope, ctx)? {
                result.insert(output_key.to_string(), reshaped);
            }
        }
    }

    Ok(result)
}
