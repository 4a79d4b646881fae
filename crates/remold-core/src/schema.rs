//! Schema model: declarative projections from source shapes to output shapes
//!
//! A [`Schema`] maps output keys to [`SchemaField`] entries. Because both
//! types derive serde traits, a projection can be declared in a JSON document
//! and loaded with `serde_json::from_str` instead of being built in code.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A schema describing how a source value should be reshaped
///
/// Keys are output keys, unique within the schema; their order carries no
/// meaning. The schema is a strict allow-list: source elements without a
/// matching entry never reach the output.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: BTreeMap<String, SchemaField>,
}

/// One entry of a [`Schema`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    /// The externally-visible source name this entry matches, compared with
    /// exact string equality
    pub source_key: String,

    /// Schema scope for the matched value's recursive transform
    ///
    /// When absent, the enclosing schema is reused for the recursive call.
    /// That default keeps deeply nested same-shaped data working with a
    /// single flat schema, but silently drops nested fields whose names are
    /// not in the enclosing schema; supply a nested schema to scope the
    /// projection explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested: Option<Schema>,
}

impl SchemaField {
    pub fn new(source_key: impl Into<String>) -> Self {
        Self {
            source_key: source_key.into(),
            nested: None,
        }
    }

    pub fn with_nested(mut self, nested: Schema) -> Self {
        self.nested = Some(nested);
        self
    }
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry under an output key, replacing any previous entry
    pub fn with_field(mut self, output_key: impl Into<String>, field: SchemaField) -> Self {
        self.fields.insert(output_key.into(), field);
        self
    }

    /// Shorthand for a flat rename entry
    pub fn map(self, output_key: impl Into<String>, source_key: impl Into<String>) -> Self {
        self.with_field(output_key, SchemaField::new(source_key))
    }

    /// Shorthand for an entry with an explicit nested scope
    pub fn nested(
        self,
        output_key: impl Into<String>,
        source_key: impl Into<String>,
        nested: Schema,
    ) -> Self {
        self.with_field(output_key, SchemaField::new(source_key).with_nested(nested))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// The declared output keys
    pub fn output_keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// All entries whose source key equals the externally-visible name
    ///
    /// Zero, one, or many entries may match; each match receives its own
    /// independently transformed copy of the source value.
    pub fn matches<'a>(
        &'a self,
        external_name: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a SchemaField)> {
        self.fields
            .iter()
            .filter(move |(_, field)| field.source_key == external_name)
            .map(|(output_key, field)| (output_key.as_str(), field))
    }
}
