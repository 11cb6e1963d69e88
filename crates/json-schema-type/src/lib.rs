//! The JSON Schema `type` keyword value.
//!
//! JSON Schema allows `type` to be either a single type name (`"string"`) or
//! an array of type names (`["string", "null"]`). [`TypeValue`] holds either
//! form and converts losslessly to and from JSON, through its
//! `serde::Serialize`/`serde::Deserialize` impls or through the
//! [`encode`]/[`decode`] functions.
//!
//! Type names are not checked against the standard vocabulary, sorted or
//! deduplicated. Empty names are dropped from arrays.
//!
//! # Example
//!
//! ```
//! use json_schema_type::{decode_str, encode, TypeValue};
//!
//! let value = decode_str(r#"["integer", "", "null"]"#).unwrap();
//! assert_eq!(value.names().collect::<Vec<_>>(), vec!["integer", "null"]);
//! assert_eq!(encode(&value), r#"["integer","null"]"#);
//!
//! // A one-element array collapses to a plain string.
//! let value = decode_str(r#"["boolean"]"#).unwrap();
//! assert_eq!(value, TypeValue::single("boolean"));
//! assert_eq!(encode(&value), r#""boolean""#);
//! ```

pub mod codec;
pub mod error;
pub mod type_value;

pub use codec::{decode, decode_str, decode_value, encode, encode_value};
pub use error::{JsonShape, TypeValueError};
pub use type_value::{TypeValue, TYPE_SEPARATOR};
