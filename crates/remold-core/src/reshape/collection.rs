//! Collection transformer
//!
//! Copyright (c) 2026 Remold Team
//! Licensed under the Apache-2.0 license

use crate::error::Result;
use crate::output::{Projection, Reshaped};
use crate::schema::Schema;
use crate::value::SourceValue;

use super::context::ReshapeContext;
use super::transform_value;

/// Project a collection element-wise through one schema
///
/// A collection is schema-homogeneous: every element is transformed under the
/// same scope. Only elements that produce a keyed mapping are appended;
/// scalar and absent results are dropped, so a collection of primitives
/// yields an empty sequence, which is valid output.
pub(super) fn transform_collection(
    items: &[SourceValue],
    schema: &Schema,
    ctx: &ReshapeContext<'_>,
) -> Result<Vec<Projection>> {
    let mut result = Vec::new();

    for (index, item) in items.iter().enumerate() {
        if item.is_null() {
            continue;
        }

        match transform_value(item, schema, ctx)? {
            Some(Reshaped::Map(projection)) => result.push(projection),
            Some(_) => {
                log::debug!("dropping collection element {}: not a keyed mapping", index);
            }
            None => {}
        }
    }

    Ok(result)
}
