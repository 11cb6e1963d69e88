//! The `type` keyword value: one type name or an ordered list of type names.

use std::cell::Cell;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::de::{
    self, Deserialize, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor,
};
use serde::ser::{Serialize, Serializer};

use crate::error::{JsonShape, TypeValueError};

/// Delimiter of the joined string form of a [`TypeValue`].
///
/// Never legal inside a JSON Schema type name. Names are not escaped, so a
/// name containing it cannot be represented in the joined form.
pub const TYPE_SEPARATOR: char = ';';

/// Value of a JSON Schema `type` keyword.
///
/// `Single` always encodes as a JSON string. `Multiple` always encodes as a
/// JSON array, whatever the number of names it holds. Empty names inside
/// `Multiple` are skipped by encoding, by every accessor, and by equality
/// and hashing.
#[derive(Debug, Clone)]
pub enum TypeValue {
    Single(String),
    Multiple(Vec<String>),
}

impl TypeValue {
    /// Builds a `Single` value.
    pub fn single(name: impl Into<String>) -> Self {
        Self::Single(name.into())
    }

    /// Builds a value from a list of names the way an array is decoded.
    ///
    /// Empty names are dropped. A single survivor collapses to `Single`;
    /// zero or several survivors give `Multiple`.
    ///
    /// # Example
    ///
    /// ```
    /// use json_schema_type::TypeValue;
    ///
    /// assert_eq!(TypeValue::from_names(["string", "", "null"]),
    ///     TypeValue::Multiple(vec!["string".into(), "null".into()]));
    /// assert_eq!(TypeValue::from_names(["boolean", ""]), TypeValue::single("boolean"));
    /// assert_eq!(TypeValue::from_names(["", ""]), TypeValue::Multiple(vec![]));
    /// ```
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|name: &String| !name.is_empty())
            .collect();
        if names.len() == 1 {
            if let Some(name) = names.pop() {
                return Self::Single(name);
            }
        }
        Self::Multiple(names)
    }

    /// Parses the joined string form.
    ///
    /// Without a separator the whole string is a single name (possibly
    /// empty). With one, the non-empty segments form a `Multiple` even when
    /// fewer than two remain.
    ///
    /// # Example
    ///
    /// ```
    /// use json_schema_type::TypeValue;
    ///
    /// assert_eq!(TypeValue::from_joined("number"), TypeValue::single("number"));
    /// assert_eq!(TypeValue::from_joined("integer;null").len(), 2);
    /// assert_eq!(TypeValue::from_joined("integer;"), TypeValue::Multiple(vec!["integer".into()]));
    /// assert!(TypeValue::from_joined(";;").is_empty());
    /// ```
    pub fn from_joined(joined: &str) -> Self {
        if !joined.contains(TYPE_SEPARATOR) {
            return Self::Single(joined.to_owned());
        }
        Self::Multiple(
            joined
                .split(TYPE_SEPARATOR)
                .filter(|part| !part.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    /// Formats the joined string form, the inverse of [`TypeValue::from_joined`].
    ///
    /// A `Multiple` with fewer than two names gets a trailing separator so it
    /// still reads back as `Multiple`.
    pub fn to_joined(&self) -> String {
        match self {
            Self::Single(name) => name.clone(),
            Self::Multiple(_) => {
                let mut joined = String::new();
                let mut count = 0;
                for name in self.names() {
                    if count > 0 {
                        joined.push(TYPE_SEPARATOR);
                    }
                    joined.push_str(name);
                    count += 1;
                }
                if count < 2 {
                    joined.push(TYPE_SEPARATOR);
                }
                joined
            }
        }
    }

    /// Iterates over the type names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        let (names, keep_empty) = match self {
            Self::Single(name) => (std::slice::from_ref(name), true),
            Self::Multiple(names) => (names.as_slice(), false),
        };
        names
            .iter()
            .map(String::as_str)
            .filter(move |name| keep_empty || !name.is_empty())
    }

    /// Number of names; always 1 for `Single`.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multiple(_) => self.names().count(),
        }
    }

    /// True only for a `Multiple` without names (encodes as `[]`).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if the value encodes as a JSON string.
    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }

    /// True if the value encodes as a JSON array.
    pub fn is_multiple(&self) -> bool {
        matches!(self, Self::Multiple(_))
    }

    /// The name of a `Single` value.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(name) => Some(name),
            Self::Multiple(_) => None,
        }
    }

    /// Checks whether `name` is one of the type names.
    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }
}

impl PartialEq for TypeValue {
    fn eq(&self, other: &Self) -> bool {
        self.is_single() == other.is_single() && self.names().eq(other.names())
    }
}

impl Eq for TypeValue {}

impl Hash for TypeValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_single().hash(state);
        for name in self.names() {
            name.hash(state);
        }
    }
}

impl Default for TypeValue {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

impl From<&str> for TypeValue {
    fn from(name: &str) -> Self {
        Self::Single(name.to_owned())
    }
}

impl From<String> for TypeValue {
    fn from(name: String) -> Self {
        Self::Single(name)
    }
}

impl From<Vec<String>> for TypeValue {
    fn from(names: Vec<String>) -> Self {
        Self::from_names(names)
    }
}

impl FromIterator<String> for TypeValue {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::from_names(iter)
    }
}

impl Serialize for TypeValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Single(name) => serializer.serialize_str(name),
            Self::Multiple(_) => serializer.collect_seq(self.names()),
        }
    }
}

impl<'de> Deserialize<'de> for TypeValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rejected = Cell::new(None);
        TypeValueSeed::new(&rejected).deserialize(deserializer)
    }
}

/// Deserializes a [`TypeValue`] and records the shape of rejected input.
///
/// On an unsupported shape the deserializer still fails with a custom error,
/// and `rejected` holds the [`JsonShape`] that caused it. Rejection happens at
/// the first offending token, so nested input is never descended into.
pub(crate) struct TypeValueSeed<'a> {
    rejected: &'a Cell<Option<JsonShape>>,
}

impl<'a> TypeValueSeed<'a> {
    pub(crate) fn new(rejected: &'a Cell<Option<JsonShape>>) -> Self {
        Self { rejected }
    }
}

impl<'de> DeserializeSeed<'de> for TypeValueSeed<'_> {
    type Value = TypeValue;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TypeValueVisitor {
            rejected: self.rejected,
        })
    }
}

fn unsupported<E: de::Error>(rejected: &Cell<Option<JsonShape>>, found: JsonShape) -> E {
    rejected.set(Some(found));
    E::custom(TypeValueError::UnsupportedShape { found })
}

struct TypeValueVisitor<'a> {
    rejected: &'a Cell<Option<JsonShape>>,
}

impl<'de> Visitor<'de> for TypeValueVisitor<'_> {
    type Value = TypeValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a type name or an array of type names")
    }

    // A decoded string is kept whole, separator included.
    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(TypeValue::Single(value.to_owned()))
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(TypeValue::Single(value))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut names = Vec::new();
        while let Some(name) = seq.next_element_seed(TypeNameSeed {
            rejected: self.rejected,
        })? {
            names.push(name);
        }
        Ok(TypeValue::from_names(names))
    }

    fn visit_bool<E>(self, _: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Err(unsupported(self.rejected, JsonShape::Boolean))
    }

    fn visit_i64<E>(self, _: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Err(unsupported(self.rejected, JsonShape::Number))
    }

    fn visit_u64<E>(self, _: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Err(unsupported(self.rejected, JsonShape::Number))
    }

    fn visit_f64<E>(self, _: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Err(unsupported(self.rejected, JsonShape::Number))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Err(unsupported(self.rejected, JsonShape::Null))
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Err(unsupported(self.rejected, JsonShape::Null))
    }

    fn visit_map<A>(self, _: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        Err(unsupported(self.rejected, JsonShape::Object))
    }
}

/// Array element of the `type` keyword. Anything but a string rejects the
/// whole array.
struct TypeNameSeed<'a> {
    rejected: &'a Cell<Option<JsonShape>>,
}

impl<'de> DeserializeSeed<'de> for TypeNameSeed<'_> {
    type Value = String;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TypeNameVisitor {
            rejected: self.rejected,
        })
    }
}

struct TypeNameVisitor<'a> {
    rejected: &'a Cell<Option<JsonShape>>,
}

impl TypeNameVisitor<'_> {
    fn reject<E: de::Error>(&self) -> E {
        unsupported(self.rejected, JsonShape::NonStringArray)
    }
}

impl<'de> Visitor<'de> for TypeNameVisitor<'_> {
    type Value = String;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a type name")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(value.to_owned())
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(value)
    }

    fn visit_bool<E>(self, _: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Err(self.reject())
    }

    fn visit_i64<E>(self, _: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Err(self.reject())
    }

    fn visit_u64<E>(self, _: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Err(self.reject())
    }

    fn visit_f64<E>(self, _: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Err(self.reject())
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Err(self.reject())
    }

    fn visit_seq<A>(self, _: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        Err(self.reject())
    }

    fn visit_map<A>(self, _: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        Err(self.reject())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &str) -> TypeValue {
        serde_json::from_str(text).expect("decode")
    }

    fn encode(value: &TypeValue) -> String {
        serde_json::to_string(value).expect("encode")
    }

    #[test]
    fn test_serialize_single() {
        assert_eq!(encode(&TypeValue::single("string")), r#""string""#);
        assert_eq!(encode(&TypeValue::default()), r#""""#);
    }

    #[test]
    fn test_serialize_multiple_skips_empty_names() {
        let value = TypeValue::Multiple(vec!["a".into(), "".into(), "b".into()]);
        assert_eq!(encode(&value), r#"["a","b"]"#);
        let value = TypeValue::Multiple(vec!["".into(), "".into()]);
        assert_eq!(encode(&value), "[]");
    }

    #[test]
    fn test_deserialize_string_is_verbatim() {
        assert_eq!(decode(r#""a;b""#), TypeValue::single("a;b"));
        assert_eq!(decode(r#""""#), TypeValue::single(""));
    }

    #[test]
    fn test_deserialize_array() {
        assert_eq!(
            decode(r#"["integer","null"]"#),
            TypeValue::Multiple(vec!["integer".into(), "null".into()])
        );
        assert_eq!(decode(r#"["boolean",""]"#), TypeValue::single("boolean"));
        assert_eq!(decode("[]"), TypeValue::Multiple(vec![]));
    }

    #[test]
    fn test_deserialize_rejects_other_shapes() {
        for text in ["42", "-1", "1.5", "true", "null", r#"{"a":1}"#, r#"["a",1]"#, r#"[["a"]]"#] {
            let err = serde_json::from_str::<TypeValue>(text).unwrap_err();
            assert!(
                err.to_string()
                    .starts_with("unsupported JSON shape for type field"),
                "{text}: {err}"
            );
        }
    }

    #[test]
    fn test_joined_form() {
        let value = TypeValue::from_names(["string", "null"]);
        assert_eq!(value.to_joined(), "string;null");
        assert_eq!(TypeValue::from_joined("string;null"), value);

        let one = TypeValue::Multiple(vec!["string".into()]);
        assert_eq!(one.to_joined(), "string;");
        assert_eq!(TypeValue::from_joined(&one.to_joined()), one);

        let none = TypeValue::Multiple(vec![]);
        assert_eq!(none.to_joined(), ";");
        assert_eq!(TypeValue::from_joined(";"), none);

        assert_eq!(TypeValue::single("number").to_joined(), "number");
    }

    #[test]
    fn test_accessors() {
        let value = TypeValue::Multiple(vec!["string".into(), "".into(), "null".into()]);
        assert_eq!(value.names().collect::<Vec<_>>(), vec!["string", "null"]);
        assert_eq!(value.len(), 2);
        assert!(value.is_multiple());
        assert!(value.contains("null"));
        assert!(!value.contains(""));
        assert_eq!(value.as_single(), None);

        let value = TypeValue::single("");
        assert_eq!(value.names().collect::<Vec<_>>(), vec![""]);
        assert_eq!(value.len(), 1);
        assert!(!value.is_empty());
        assert_eq!(value.as_single(), Some(""));

        assert!(TypeValue::Multiple(vec!["".into()]).is_empty());
    }

    #[test]
    fn test_conversions() {
        assert_eq!(TypeValue::from("object"), TypeValue::single("object"));
        assert_eq!(
            TypeValue::from(vec!["array".to_string()]),
            TypeValue::single("array")
        );
        let collected: TypeValue = ["a", "b"].iter().map(|s| s.to_string()).collect();
        assert_eq!(collected.len(), 2);
    }

    #[test]
    fn test_equality_ignores_empty_names() {
        use std::collections::HashSet;

        let with_gap = TypeValue::Multiple(vec!["a".into(), "".into(), "b".into()]);
        let plain = TypeValue::Multiple(vec!["a".into(), "b".into()]);
        assert_eq!(encode(&with_gap), encode(&plain));
        assert_eq!(with_gap, plain);

        let mut set = HashSet::new();
        set.insert(with_gap);
        assert!(set.contains(&plain));

        assert_eq!(TypeValue::Multiple(vec!["".into()]), TypeValue::Multiple(vec![]));
        assert_ne!(TypeValue::Multiple(vec!["a".into()]), TypeValue::single("a"));
        assert_ne!(TypeValue::single(""), TypeValue::Multiple(vec![]));
    }

    #[test]
    fn test_deserialize_records_rejected_shape() {
        let rejected = Cell::new(None);
        let mut de = serde_json::Deserializer::from_str(r#"["string",{"a":1}]"#);
        assert!(TypeValueSeed::new(&rejected).deserialize(&mut de).is_err());
        assert_eq!(rejected.get(), Some(JsonShape::NonStringArray));

        let rejected = Cell::new(None);
        let mut de = serde_json::Deserializer::from_str(r#"["string","null"]"#);
        assert!(TypeValueSeed::new(&rejected).deserialize(&mut de).is_ok());
        assert_eq!(rejected.get(), None);
    }
}
