//! Source data model for the reshaping engine
//!
//! The engine does not inspect runtime type metadata. Instead, every source
//! is represented as [`SourceValue`], a closed variant over the structural
//! shapes the engine understands, built once at the call boundary: explicitly
//! through the [`Record`]/[`TagTable`] builders, through the serde adapter in
//! [`crate::json`], or through a custom [`ToSource`] implementation.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, Serializer};

use crate::error::{Error, Result};

/// Structural category of a source value
///
/// Computed fresh per value by [`SourceValue::kind`]; never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A record with fixed, named fields
    Record,
    /// A keyed, dynamically-sized mapping
    Mapping,
    /// A variable-length sequence
    Sequence,
    /// A fixed-length sequence; handled exactly like [`Kind::Sequence`]
    Tuple,
    /// One level of indirection to another value
    Reference,
    /// An absent value, including a reference to an absent value
    Null,
    /// An opaque primitive, passed through unchanged
    Scalar,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Record => write!(f, "record"),
            Kind::Mapping => write!(f, "mapping"),
            Kind::Sequence => write!(f, "sequence"),
            Kind::Tuple => write!(f, "tuple"),
            Kind::Reference => write!(f, "reference"),
            Kind::Null => write!(f, "null"),
            Kind::Scalar => write!(f, "scalar"),
        }
    }
}

/// A primitive value the engine never decomposes
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Timestamp(DateTime<Utc>),
    Bytes(Vec<u8>),
}

impl Serialize for Scalar {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Scalar::Bool(value) => serializer.serialize_bool(*value),
            Scalar::Int(value) => serializer.serialize_i64(*value),
            Scalar::UInt(value) => serializer.serialize_u64(*value),
            Scalar::Float(value) => serializer.serialize_f64(*value),
            Scalar::Str(value) => serializer.serialize_str(value),
            Scalar::Timestamp(value) => serializer.serialize_str(&value.to_rfc3339()),
            Scalar::Bytes(value) => serializer.serialize_bytes(value),
        }
    }
}

/// A source value, classified by shape rather than by concrete type
#[derive(Debug, Clone, PartialEq)]
pub enum SourceValue {
    /// A record with named fields and a tag table (see [`Record`])
    Record(Record),
    /// A keyed mapping; entry keys are the externally-visible names
    Mapping(BTreeMap<String, SourceValue>),
    /// A variable-length collection
    Sequence(Vec<SourceValue>),
    /// A fixed-length collection, reshaped exactly like a sequence
    Tuple(Vec<SourceValue>),
    /// One level of indirection to another value
    Reference(Box<SourceValue>),
    /// An absent value
    Null,
    /// An opaque primitive
    Scalar(Scalar),
}

impl SourceValue {
    /// Classify this value's structural shape
    pub fn kind(&self) -> Kind {
        match self {
            SourceValue::Record(_) => Kind::Record,
            SourceValue::Mapping(_) => Kind::Mapping,
            SourceValue::Sequence(_) => Kind::Sequence,
            SourceValue::Tuple(_) => Kind::Tuple,
            SourceValue::Reference(inner) if inner.is_null() => Kind::Null,
            SourceValue::Reference(_) => Kind::Reference,
            SourceValue::Null => Kind::Null,
            SourceValue::Scalar(_) => Kind::Scalar,
        }
    }

    /// True when the value is absent, or a reference to an absent value
    pub fn is_null(&self) -> bool {
        self.kind() == Kind::Null
    }

    /// Build a keyed mapping from `(key, value)` pairs
    pub fn mapping<K, V, I>(entries: I) -> SourceValue
    where
        K: Into<String>,
        V: Into<SourceValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        SourceValue::Mapping(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Build a variable-length collection
    pub fn sequence<V, I>(items: I) -> SourceValue
    where
        V: Into<SourceValue>,
        I: IntoIterator<Item = V>,
    {
        SourceValue::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Build a fixed-length collection
    pub fn tuple<V, I>(items: I) -> SourceValue
    where
        V: Into<SourceValue>,
        I: IntoIterator<Item = V>,
    {
        SourceValue::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Wrap a value in one level of indirection
    pub fn reference(value: impl Into<SourceValue>) -> SourceValue {
        SourceValue::Reference(Box::new(value.into()))
    }
}

/// Adapter interface for building a [`SourceValue`] from a user type
///
/// This is the seam between caller-owned data and the engine's closed value
/// model. Implementations that can fail should report through
/// [`Error::adapter`].
pub trait ToSource {
    fn to_source(&self) -> Result<SourceValue>;
}

impl ToSource for SourceValue {
    fn to_source(&self) -> Result<SourceValue> {
        Ok(self.clone())
    }
}

impl ToSource for Record {
    fn to_source(&self) -> Result<SourceValue> {
        Ok(SourceValue::Record(self.clone()))
    }
}

/// Externally-visible names for a record type's fields
///
/// One table is declared per record type and maps a field name to its name
/// under each tag namespace, the way a serialization annotation would. The
/// table doubles as the declaration of which fields exist at all: reshaping a
/// record whose field is missing from its table fails with
/// [`Error::FieldNotFound`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TagTable {
    entries: BTreeMap<String, BTreeMap<String, String>>,
}

impl TagTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field and its externally-visible name under a tag namespace
    pub fn with_tag(
        mut self,
        field: impl Into<String>,
        namespace: impl Into<String>,
        external: impl Into<String>,
    ) -> Self {
        self.entries
            .entry(field.into())
            .or_default()
            .insert(namespace.into(), external.into());
        self
    }

    /// Declare a field with no externally-visible name in any namespace
    pub fn declare(mut self, field: impl Into<String>) -> Self {
        self.entries.entry(field.into()).or_default();
        self
    }

    /// Whether the field is declared at all
    pub fn declares(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    /// The field's externally-visible name under a namespace, if any
    pub fn get(&self, field: &str, namespace: &str) -> Option<&str> {
        self.entries
            .get(field)?
            .get(namespace)
            .map(String::as_str)
    }
}

/// One field of a [`Record`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    name: String,
    value: SourceValue,
}

impl RecordField {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &SourceValue {
        &self.value
    }
}

/// A record-shaped source value: named fields plus a [`TagTable`]
///
/// Field iteration order is declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    name: String,
    tags: TagTable,
    fields: Vec<RecordField>,
}

impl Record {
    /// Create a record of the named type with its tag table
    pub fn new(name: impl Into<String>, tags: TagTable) -> Self {
        Self {
            name: name.into(),
            tags,
            fields: Vec::new(),
        }
    }

    /// Append a field; fields keep their declaration order
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<SourceValue>) -> Self {
        self.fields.push(RecordField {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// The record type's name, used in diagnostics
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[RecordField] {
        &self.fields
    }

    /// Resolve a field's externally-visible name under a tag namespace
    ///
    /// Returns `Ok(None)` when the field is declared but has no name under
    /// `namespace` (an empty tag value counts as no name); the caller decides
    /// what that means via [`TagPolicy`](crate::error::TagPolicy).
    pub fn external_name(&self, field: &str, namespace: &str) -> Result<Option<&str>> {
        if !self.tags.declares(field) {
            return Err(Error::FieldNotFound {
                record: self.name.clone(),
                field: field.to_string(),
            });
        }

        Ok(self
            .tags
            .get(field, namespace)
            .filter(|external| !external.is_empty()))
    }
}

// Scalar conversions
impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(value.into())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Scalar::UInt(value)
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar::Float(value.into())
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(value: DateTime<Utc>) -> Self {
        Scalar::Timestamp(value)
    }
}

impl From<Vec<u8>> for Scalar {
    fn from(value: Vec<u8>) -> Self {
        Scalar::Bytes(value)
    }
}

// SourceValue conversions
macro_rules! scalar_into_source {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for SourceValue {
                fn from(value: $ty) -> Self {
                    SourceValue::Scalar(value.into())
                }
            }
        )*
    };
}

scalar_into_source!(bool, i32, i64, u64, f32, f64, &str, String, DateTime<Utc>, Vec<u8>);

impl From<Scalar> for SourceValue {
    fn from(value: Scalar) -> Self {
        SourceValue::Scalar(value)
    }
}

impl From<Record> for SourceValue {
    fn from(value: Record) -> Self {
        SourceValue::Record(value)
    }
}

impl From<BTreeMap<String, SourceValue>> for SourceValue {
    fn from(value: BTreeMap<String, SourceValue>) -> Self {
        SourceValue::Mapping(value)
    }
}

impl From<Vec<SourceValue>> for SourceValue {
    fn from(value: Vec<SourceValue>) -> Self {
        SourceValue::Sequence(value)
    }
}

impl<T> From<Option<T>> for SourceValue
where
    T: Into<SourceValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => SourceValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_record() -> Record {
        let tags = TagTable::new()
            .with_tag("name", "json", "name")
            .with_tag("email", "json", "email")
            .with_tag("code", "schema", "product_code")
            .declare("internal_id");

        Record::new("User", tags)
            .with_field("name", "John doe")
            .with_field("email", "johndoe@example.com")
            .with_field("internal_id", 42i64)
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(create_test_record().to_source().unwrap().kind(), Kind::Record);
        assert_eq!(
            SourceValue::mapping([("a", 1i64)]).kind(),
            Kind::Mapping
        );
        assert_eq!(SourceValue::sequence([1i64, 2]).kind(), Kind::Sequence);
        assert_eq!(SourceValue::tuple([1i64, 2]).kind(), Kind::Tuple);
        assert_eq!(SourceValue::reference("x").kind(), Kind::Reference);
        assert_eq!(SourceValue::Null.kind(), Kind::Null);
        assert_eq!(SourceValue::from(true).kind(), Kind::Scalar);
    }

    #[test]
    fn test_nil_reference_classifies_as_null() {
        let nil_ref = SourceValue::reference(SourceValue::Null);
        assert_eq!(nil_ref.kind(), Kind::Null);
        assert!(nil_ref.is_null());

        let nested = SourceValue::reference(SourceValue::reference(SourceValue::Null));
        assert_eq!(nested.kind(), Kind::Null);
    }

    #[test]
    fn test_sequence_of_scalars_is_a_sequence() {
        // Classification is structural; element types do not matter.
        let values = SourceValue::sequence(["a", "b"]);
        assert_eq!(values.kind(), Kind::Sequence);

        // Raw byte strings are the opaque exception.
        let bytes = SourceValue::from(vec![1u8, 2, 3]);
        assert_eq!(bytes.kind(), Kind::Scalar);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(SourceValue::from(None::<bool>), SourceValue::Null);
        assert_eq!(
            SourceValue::from(Some(true)),
            SourceValue::Scalar(Scalar::Bool(true))
        );
    }

    #[test]
    fn test_external_name_resolution() {
        let record = create_test_record();

        assert_eq!(record.external_name("name", "json").unwrap(), Some("name"));
        assert_eq!(record.external_name("email", "json").unwrap(), Some("email"));

        // Declared but untagged under this namespace
        assert_eq!(record.external_name("internal_id", "json").unwrap(), None);
        assert_eq!(record.external_name("name", "schema").unwrap(), None);
    }

    #[test]
    fn test_external_name_for_undeclared_field() {
        let record = create_test_record();
        let err = record.external_name("phone", "json").unwrap_err();

        match err {
            Error::FieldNotFound { record, field } => {
                assert_eq!(record, "User");
                assert_eq!(field, "phone");
            }
            other => panic!("expected FieldNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_tag_counts_as_untagged() {
        let tags = TagTable::new().with_tag("name", "json", "");
        let record = Record::new("Thing", tags).with_field("name", "x");

        assert_eq!(record.external_name("name", "json").unwrap(), None);
    }

    #[test]
    fn test_field_declaration_order_is_kept() {
        let record = create_test_record();
        let names: Vec<&str> = record.fields().iter().map(RecordField::name).collect();
        assert_eq!(names, vec!["name", "email", "internal_id"]);
    }

    #[test]
    fn test_scalar_serializes_to_json() {
        let ts = DateTime::from_timestamp(0, 0).unwrap();
        assert_eq!(
            serde_json::to_value(Scalar::Timestamp(ts)).unwrap(),
            serde_json::json!("1970-01-01T00:00:00+00:00")
        );
        assert_eq!(
            serde_json::to_value(Scalar::Int(-3)).unwrap(),
            serde_json::json!(-3)
        );
    }
}
