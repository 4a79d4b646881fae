//! Output model produced by the reshaping engine
//!
//! A transform of a record or keyed mapping yields a [`Projection`]; a
//! transform of a collection yields one projection per element. Output values
//! are newly allocated per invocation and owned by the caller.

use std::collections::BTreeMap;

use serde::ser::{Serialize, Serializer};

use crate::value::{Scalar, SourceValue};

/// The keyed mapping produced by reshaping a record or mapping
///
/// Its key set is always a subset of the schema's declared output keys.
pub type Projection = BTreeMap<String, Reshaped>;

/// A reshaped output value
#[derive(Debug, Clone, PartialEq)]
pub enum Reshaped {
    /// Output of a record or keyed-mapping source
    Map(Projection),
    /// Output of a sequence or tuple source, one projection per element
    Seq(Vec<Projection>),
    /// An opaque scalar passed through unchanged
    Scalar(Scalar),
}

impl Reshaped {
    pub fn as_map(&self) -> Option<&Projection> {
        match self {
            Reshaped::Map(projection) => Some(projection),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Projection]> {
        match self {
            Reshaped::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Reshaped::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }
}

impl Serialize for Reshaped {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Reshaped::Map(projection) => projection.serialize(serializer),
            Reshaped::Seq(items) => items.serialize(serializer),
            Reshaped::Scalar(scalar) => scalar.serialize(serializer),
        }
    }
}

// A previous output can be fed back into the engine, e.g. to re-project it
// under another schema.
impl From<Reshaped> for SourceValue {
    fn from(value: Reshaped) -> Self {
        match value {
            Reshaped::Map(projection) => projection.into(),
            Reshaped::Seq(items) => {
                SourceValue::Sequence(items.into_iter().map(SourceValue::from).collect())
            }
            Reshaped::Scalar(scalar) => SourceValue::Scalar(scalar),
        }
    }
}

impl From<Projection> for SourceValue {
    fn from(projection: Projection) -> Self {
        SourceValue::Mapping(
            projection
                .into_iter()
                .map(|(key, value)| (key, value.into()))
                .collect(),
        )
    }
}
