//! Encode/decode functions between [`TypeValue`] and JSON.
//!
//! These are the same transforms the `Serialize`/`Deserialize` impls perform,
//! exposed as plain functions with a typed error.

use std::cell::Cell;

use serde::de::DeserializeSeed;
use serde_json::Value;

use crate::error::{JsonShape, TypeValueError};
use crate::type_value::{TypeValue, TypeValueSeed};

/// Converts a value to its JSON form: a string for `Single`, an array of the
/// non-empty names for `Multiple`.
pub fn encode_value(value: &TypeValue) -> Value {
    match value {
        TypeValue::Single(name) => Value::String(name.clone()),
        TypeValue::Multiple(_) => Value::Array(
            value
                .names()
                .map(|name| Value::String(name.to_owned()))
                .collect(),
        ),
    }
}

/// Encodes a value as compact JSON text.
///
/// # Example
///
/// ```
/// use json_schema_type::{encode, TypeValue};
///
/// assert_eq!(encode(&TypeValue::single("number")), r#""number""#);
/// assert_eq!(encode(&TypeValue::from_names(["integer", "null"])), r#"["integer","null"]"#);
/// assert_eq!(encode(&TypeValue::from_joined(";")), "[]");
/// ```
pub fn encode(value: &TypeValue) -> String {
    encode_value(value).to_string()
}

/// Decodes an already parsed JSON value.
///
/// # Errors
///
/// Returns [`TypeValueError::UnsupportedShape`] unless `json` is a string or
/// an array whose elements are all strings.
pub fn decode_value(json: &Value) -> Result<TypeValue, TypeValueError> {
    if let Some(found) = JsonShape::of(json) {
        return Err(reject(found));
    }
    match json.as_array() {
        Some(items) => Ok(TypeValue::from_names(items.iter().filter_map(Value::as_str))),
        None => Ok(TypeValue::Single(json.as_str().unwrap_or_default().to_owned())),
    }
}

/// Decodes JSON text.
///
/// # Errors
///
/// Returns [`TypeValueError::Json`] for malformed JSON and
/// [`TypeValueError::UnsupportedShape`] for any shape other than a string or
/// an array of strings.
///
/// # Example
///
/// ```
/// use json_schema_type::{decode_str, TypeValue, TypeValueError};
///
/// assert_eq!(decode_str(r#"["boolean", ""]"#).unwrap(), TypeValue::single("boolean"));
/// assert!(matches!(decode_str("42"), Err(TypeValueError::UnsupportedShape { .. })));
/// assert!(matches!(decode_str("[\"a\""), Err(TypeValueError::Json(_))));
/// ```
pub fn decode_str(text: &str) -> Result<TypeValue, TypeValueError> {
    decode(text.as_bytes())
}

/// Decodes raw JSON bytes. See [`decode_str`].
///
/// The input is streamed through the same visitor as the `Deserialize` impl,
/// so the shape is decided at the first offending token.
pub fn decode(bytes: &[u8]) -> Result<TypeValue, TypeValueError> {
    let rejected = Cell::new(None);
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let result = TypeValueSeed::new(&rejected)
        .deserialize(&mut deserializer)
        .and_then(|value| deserializer.end().map(|()| value));
    result.map_err(|err| match rejected.get() {
        Some(found) => reject(found),
        None => {
            tracing::debug!(error = %err, "malformed JSON for type field");
            TypeValueError::Json(err)
        }
    })
}

fn reject(found: JsonShape) -> TypeValueError {
    tracing::debug!(%found, "rejected type field");
    TypeValueError::UnsupportedShape { found }
}
