//! Record transformer
//!
//! Copyright (c) 2026 Remold Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result, TagPolicy};
use crate::output::Projection;
use crate::schema::Schema;
use crate::value::{Kind, Record};

use super::context::ReshapeContext;
use super::transform_value;

/// Project a record's fields through the schema
///
/// Fields are visited in declaration order (output order is irrelevant, the
/// projection is keyed). A resolution failure aborts the whole transform;
/// nil-valued fields are skipped; a record with zero matching fields yields
/// an empty projection, not an error.
pub(super) fn transform_record(
    record: &Record,
    schema: &Schema,
    ctx: &ReshapeContext<'_>,
) -> Result<Projection> {
    let options = ctx.options();
    let mut result = Projection::new();

    for field in record.fields() {
        let external = match record.external_name(field.name(), &options.tag)? {
            Some(name) => name,
            None => match options.tag_policy {
                TagPolicy::Lenient => continue,
                TagPolicy::Strict => {
                    return Err(Error::TagMissing {
                        record: record.name().to_string(),
                        field: field.name().to_string(),
                        tag: options.tag.clone(),
                    });
                }
            },
        };

        if field.value().kind() == Kind::Null {
            continue;
        }

        for (output_key, entry) in schema.matches(external) {
            let scope = entry.nested.as_ref().unwrap_or(schema);

            if let Some(value) = transform_value(field.value(), scope, ctx)? {
                result.insert(output_key.to_string(), value);
            }
        }
    }

    Ok(result)
}
