//! Error types for decoding the `type` keyword.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Kind of JSON value found where a type name or type name array was expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Null,
    Boolean,
    Number,
    Object,
    /// An array with at least one element that is not a string.
    NonStringArray,
}

impl JsonShape {
    /// Classifies a JSON value that is not an accepted `type` shape.
    ///
    /// Strings and string arrays have no rejected shape and return `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use json_schema_type::JsonShape;
    /// use serde_json::json;
    ///
    /// assert_eq!(JsonShape::of(&json!(42)), Some(JsonShape::Number));
    /// assert_eq!(JsonShape::of(&json!(["a", 1])), Some(JsonShape::NonStringArray));
    /// assert_eq!(JsonShape::of(&json!(["a", "b"])), None);
    /// assert_eq!(JsonShape::of(&json!("a")), None);
    /// ```
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::Null),
            Value::Bool(_) => Some(Self::Boolean),
            Value::Number(_) => Some(Self::Number),
            Value::Object(_) => Some(Self::Object),
            Value::String(_) => None,
            Value::Array(items) => {
                if items.iter().all(Value::is_string) {
                    None
                } else {
                    Some(Self::NonStringArray)
                }
            }
        }
    }

    /// Lowercase name used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Object => "object",
            Self::NonStringArray => "array with non-string elements",
        }
    }
}

impl fmt::Display for JsonShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to decode a `type` keyword value.
#[derive(Debug, Error)]
pub enum TypeValueError {
    #[error("unsupported JSON shape for type field: expected a string or an array of strings, found {found}")]
    UnsupportedShape { found: JsonShape },
    #[error("malformed JSON for type field: {0}")]
    Json(#[from] serde_json::Error),
}
