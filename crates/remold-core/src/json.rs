//! serde_json boundary adapter
//!
//! Builds the closed source variant from JSON values and renders reshaped
//! output back into JSON payloads. JSON objects become keyed mappings (their
//! keys are the externally-visible names, no tag table involved), arrays
//! become sequences, and primitives become opaque scalars.

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::output::{Projection, Reshaped};
use crate::value::{Scalar, SourceValue, ToSource};

impl From<Value> for SourceValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => SourceValue::Null,
            Value::Bool(value) => SourceValue::Scalar(Scalar::Bool(value)),
            Value::Number(number) => {
                if let Some(value) = number.as_i64() {
                    SourceValue::Scalar(Scalar::Int(value))
                } else if let Some(value) = number.as_u64() {
                    SourceValue::Scalar(Scalar::UInt(value))
                } else {
                    SourceValue::Scalar(Scalar::Float(number.as_f64().unwrap_or(f64::NAN)))
                }
            }
            Value::String(value) => SourceValue::Scalar(Scalar::Str(value)),
            Value::Array(items) => {
                SourceValue::Sequence(items.into_iter().map(SourceValue::from).collect())
            }
            Value::Object(entries) => SourceValue::Mapping(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, value.into()))
                    .collect(),
            ),
        }
    }
}

impl ToSource for Value {
    fn to_source(&self) -> Result<SourceValue> {
        Ok(self.clone().into())
    }
}

/// Build a source value from any serializable type
///
/// The value goes through its JSON representation, so structs arrive as
/// keyed mappings with their serde-renamed field names as keys.
pub fn from_serialize<T: Serialize>(value: &T) -> Result<SourceValue> {
    Ok(serde_json::to_value(value)?.into())
}

impl From<&Scalar> for Value {
    fn from(scalar: &Scalar) -> Self {
        match scalar {
            Scalar::Bool(value) => Value::Bool(*value),
            Scalar::Int(value) => Value::from(*value),
            Scalar::UInt(value) => Value::from(*value),
            Scalar::Float(value) => Value::from(*value),
            Scalar::Str(value) => Value::String(value.clone()),
            Scalar::Timestamp(value) => Value::String(value.to_rfc3339()),
            Scalar::Bytes(bytes) => Value::Array(bytes.iter().map(|byte| Value::from(*byte)).collect()),
        }
    }
}

impl From<&Reshaped> for Value {
    fn from(value: &Reshaped) -> Self {
        match value {
            Reshaped::Map(projection) => projection_value(projection),
            Reshaped::Seq(items) => Value::Array(items.iter().map(projection_value).collect()),
            Reshaped::Scalar(scalar) => scalar.into(),
        }
    }
}

impl From<Reshaped> for Value {
    fn from(value: Reshaped) -> Self {
        Value::from(&value)
    }
}

fn projection_value(projection: &Projection) -> Value {
    Value::Object(
        projection
            .iter()
            .map(|(key, value)| (key.clone(), Value::from(value)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Kind;
    use serde_json::json;

    #[test]
    fn test_json_object_becomes_mapping() {
        let source = SourceValue::from(json!({
            "name": "John doe",
            "permissions": [{"permission_name": "Admin"}],
            "active": true,
            "deleted_at": null,
        }));

        let entries = match &source {
            SourceValue::Mapping(entries) => entries,
            other => panic!("expected a mapping, got {:?}", other),
        };

        assert_eq!(entries["name"], SourceValue::from("John doe"));
        assert_eq!(entries["active"], SourceValue::from(true));
        assert_eq!(entries["deleted_at"], SourceValue::Null);
        assert_eq!(entries["permissions"].kind(), Kind::Sequence);
    }

    #[test]
    fn test_json_numbers_keep_their_width() {
        assert_eq!(
            SourceValue::from(json!(-7)),
            SourceValue::Scalar(Scalar::Int(-7))
        );
        assert_eq!(
            SourceValue::from(json!(u64::MAX)),
            SourceValue::Scalar(Scalar::UInt(u64::MAX))
        );
        assert_eq!(
            SourceValue::from(json!(1.5)),
            SourceValue::Scalar(Scalar::Float(1.5))
        );
    }

    #[test]
    fn test_from_serialize() {
        #[derive(Serialize)]
        struct Permission {
            permission_name: String,
            permission_code: i64,
        }

        let source = from_serialize(&Permission {
            permission_name: "Admin".to_string(),
            permission_code: 0,
        })
        .unwrap();

        assert_eq!(
            source,
            SourceValue::mapping([
                ("permission_name", SourceValue::from("Admin")),
                ("permission_code", SourceValue::from(0i64)),
            ])
        );
    }

    #[test]
    fn test_reshaped_renders_to_json() {
        let projection = Projection::from([
            ("name".to_string(), Reshaped::Scalar(Scalar::Str("Admin".to_string()))),
            ("code".to_string(), Reshaped::Scalar(Scalar::Int(0))),
        ]);

        assert_eq!(
            Value::from(Reshaped::Seq(vec![projection])),
            json!([{"name": "Admin", "code": 0}])
        );
    }
}
