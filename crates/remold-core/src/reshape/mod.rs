//! Reshaping engine: schema-directed recursive projection of source values
//!
//! This module implements the core transformation: classify the source,
//! resolve each element's externally-visible name, match it against the
//! schema, and descend into nested records, mappings, and collections. The
//! descent is depth-first, bounded by
//! [`ReshapeOptions::max_depth`](crate::options::ReshapeOptions::max_depth).
//!
//! Copyright (c) 2026 Remold Team
//! Licensed under the Apache-2.0 license

pub mod context;

mod collection;
mod mapping;
mod record;

#[cfg(test)]
mod prop_tests;

use crate::error::{Error, Result};
use crate::options::ReshapeOptions;
use crate::output::Reshaped;
use crate::schema::Schema;
use crate::value::{Kind, SourceValue};

pub use context::ReshapeContext;

/// Reshape a source value with the given schema and options
///
/// This function is the engine entry point. The source must be a record, a
/// keyed mapping, or a collection of either; records and mappings produce a
/// single [`Reshaped::Map`], collections produce a [`Reshaped::Seq`] with one
/// projection per element.
///
/// # Returns
///
/// - `Ok(Some(_))` with the reshaped output,
/// - `Ok(None)` when the source is absent (nil propagates, it is not an
///   error),
/// - `Err(_)` on the first failure at any recursion depth; no partial output
///   is ever returned alongside an error.
///
/// # Errors
///
/// Returns an error if:
/// - the top-level value is an opaque scalar ([`Error::UnsupportedSource`]);
///   there is nothing to project a schema onto,
/// - a record field cannot be resolved ([`Error::FieldNotFound`], or
///   [`Error::TagMissing`] under [`TagPolicy::Strict`](crate::error::TagPolicy::Strict)),
/// - the source nests deeper than the configured limit
///   ([`Error::DepthExceeded`]).
///
/// # Example
///
/// ```
/// use remold_core::{reshape, ReshapeOptions, Schema, SourceValue};
///
/// # fn main() -> remold_core::Result<()> {
/// let source = SourceValue::mapping([("name", "John doe"), ("phone", "911")]);
/// let schema = Schema::new().map("username", "name");
///
/// let result = reshape(&source, &schema, &ReshapeOptions::default())?
///     .expect("source is present");
///
/// let projection = result.as_map().expect("mapping input yields a map");
/// assert_eq!(projection.len(), 1);
/// assert!(projection.contains_key("username"));
/// # Ok(())
/// # }
/// ```
pub fn reshape(
    source: &SourceValue,
    schema: &Schema,
    options: &ReshapeOptions,
) -> Result<Option<Reshaped>> {
    let ctx = ReshapeContext::new(options);

    // Unwrap top-level indirection before deciding whether the shape is
    // supported; a reference to a record is reshaped like the record itself.
    let mut value = source;
    while let SourceValue::Reference(inner) = value {
        value = &**inner;
    }

    match value {
        SourceValue::Null => Ok(None),
        SourceValue::Scalar(_) => Err(Error::UnsupportedSource { kind: Kind::Scalar }),
        _ => transform_value(value, schema, &ctx),
    }
}

/// Transform a single value under the given schema scope
///
/// The dispatcher of the recursive descent: scalars pass through unchanged
/// (the base case), references are unwrapped one level, containers are
/// delegated to their transformer, and absence yields `None`.
pub(crate) fn transform_value(
    value: &SourceValue,
    schema: &Schema,
    ctx: &ReshapeContext<'_>,
) -> Result<Option<Reshaped>> {
    let ctx = ctx.descend()?;
    log::trace!("reshaping a {} at depth {}", value.kind(), ctx.depth());

    match value {
        SourceValue::Scalar(scalar) => Ok(Some(Reshaped::Scalar(scalar.clone()))),
        SourceValue::Reference(inner) => {
            if inner.is_null() {
                return Ok(None);
            }
            transform_value(inner, schema, &ctx)
        }
        SourceValue::Record(record) => Ok(Some(Reshaped::Map(record::transform_record(
            record, schema, &ctx,
        )?))),
        SourceValue::Mapping(entries) => Ok(Some(Reshaped::Map(mapping::transform_mapping(
            entries, schema, &ctx,
        )?))),
        SourceValue::Sequence(items) | SourceValue::Tuple(items) => Ok(Some(Reshaped::Seq(
            collection::transform_collection(items, schema, &ctx)?,
        ))),
        SourceValue::Null => Ok(None),
    }
}

/// The reshaping engine
///
/// Owns the active [`ReshapeOptions`] and applies them to every
/// [`transform`](Reshaper::transform) call. Reconfiguring requires
/// `&mut self`, so options can never change mid-transform; sharing one
/// engine across threads is safe.
#[derive(Debug, Clone, Default)]
pub struct Reshaper {
    options: ReshapeOptions,
}

impl Reshaper {
    /// Create an engine with the default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with the given options
    pub fn with_options(options: ReshapeOptions) -> Self {
        Self { options }
    }

    /// Replace the active options for subsequent calls
    pub fn set_options(&mut self, options: ReshapeOptions) {
        self.options = options;
    }

    /// The active options
    pub fn options(&self) -> &ReshapeOptions {
        &self.options
    }

    /// Reshape a source value with the engine's options
    ///
    /// See [`reshape`] for the contract.
    pub fn transform(&self, source: &SourceValue, schema: &Schema) -> Result<Option<Reshaped>> {
        reshape(source, schema, &self.options)
    }
}
