//! Canonical structural values and the recursive normalizer
//!
//! Anything that can describe its own structure through [`Structured`]
//! can be normalized into a [`Value`]: strings, integers, booleans,
//! floats (NaN canonicalized), ordered arrays, and string-keyed tables.
//! Everything else is rejected with a type error.
//!
//! ```
//! use std::collections::BTreeMap;
//! use filedata::value::{normalize, Value};
//!
//! let mut raw = BTreeMap::new();
//! raw.insert("ratio", vec![1.5, f64::NAN]);
//!
//! let value = normalize(&raw).unwrap();
//! let ratio = value.as_table().unwrap()["ratio"].as_array().unwrap();
//! assert_eq!(ratio[0], Value::Float(1.5));
//! assert!(ratio[1].is_nan());
//! ```

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::ser::{Serialize, Serializer};

use crate::error::{Error, Result};

/// String-keyed mapping of values, iterated in key order.
pub type Table = BTreeMap<String, Value>;

/// A normalized value.
#[derive(Debug, Clone)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Array(Vec<Value>),
    Table(Table),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Array(_) => "array",
            Value::Table(_) => "table",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Float(f) if f.is_nan())
    }

    /// True for arrays and tables.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Table(_))
    }
}

/// Structural equality; NaN floats compare equal to each other.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Table(a), Value::Table(b)) => a == b,
            _ => false,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Array(items) => serializer.collect_seq(items),
            Value::Table(table) => serializer.collect_map(table),
        }
    }
}

/// Inline, TOML-flavoured rendering.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s:?}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) if x.is_nan() => write!(f, "nan"),
            Value::Float(x) if x.is_infinite() => {
                write!(f, "{}", if *x > 0.0 { "inf" } else { "-inf" })
            }
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Table(table) if table.is_empty() => write!(f, "{{}}"),
            Value::Table(table) => {
                write!(f, "{{ ")?;
                for (i, (key, value)) in table.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                write!(f, " }}")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        if f.is_nan() {
            Value::Float(f64::NAN)
        } else {
            Value::Float(f)
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Table> for Value {
    fn from(table: Table) -> Self {
        Value::Table(table)
    }
}

/// The structural shape a value exposes to the normalizer.
pub enum Shape<'a> {
    /// A NaN-like value of any numeric representation
    Nan,
    /// A string, or a value equal to its own string form (enum-like
    /// labels, datetimes)
    Text(Cow<'a, str>),
    Integer(i64),
    Boolean(bool),
    Float(f64),
    /// Key-value pairs; keys must themselves have a `Text` shape
    Mapping(Box<dyn Iterator<Item = (&'a dyn Structured, &'a dyn Structured)> + 'a>),
    /// Ordered elements
    Sequence(Box<dyn Iterator<Item = &'a dyn Structured> + 'a>),
    /// Anything else, described by a type name
    Unsupported(&'static str),
}

impl Shape<'_> {
    fn describe(&self) -> &'static str {
        match self {
            Shape::Nan => "nan",
            Shape::Text(_) => "string",
            Shape::Integer(_) => "integer",
            Shape::Boolean(_) => "boolean",
            Shape::Float(_) => "float",
            Shape::Mapping(_) => "mapping",
            Shape::Sequence(_) => "sequence",
            Shape::Unsupported(name) => *name,
        }
    }
}

/// Capability of describing a value's structure for normalization.
///
/// Implement this for domain types that should be storable in a config
/// tree. A fieldless enum usually reports `Shape::Text` with its label.
pub trait Structured {
    fn shape(&self) -> Shape<'_>;
}

/// Normalize any structured value into its canonical form.
pub fn normalize(value: &dyn Structured) -> Result<Value> {
    match value.shape() {
        Shape::Nan => Ok(Value::Float(f64::NAN)),
        Shape::Float(f) if f.is_nan() => Ok(Value::Float(f64::NAN)),
        Shape::Float(f) => Ok(Value::Float(f)),
        Shape::Text(s) => Ok(Value::String(s.into_owned())),
        Shape::Integer(i) => Ok(Value::Integer(i)),
        Shape::Boolean(b) => Ok(Value::Boolean(b)),
        Shape::Mapping(entries) => normalize_entries(entries).map(Value::Table),
        Shape::Sequence(items) => items
            .map(normalize)
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Shape::Unsupported(found) => Err(Error::unsupported(found)),
    }
}

/// Normalize a value that must be a mapping at the top level.
pub fn normalize_table(value: &dyn Structured) -> Result<Table> {
    match value.shape() {
        Shape::Mapping(entries) => normalize_entries(entries),
        other => Err(Error::NotATable {
            found: other.describe().to_string(),
        }),
    }
}

fn normalize_entries<'a>(
    entries: impl Iterator<Item = (&'a dyn Structured, &'a dyn Structured)>,
) -> Result<Table> {
    let mut table = Table::new();
    for (key, value) in entries {
        let key = match key.shape() {
            Shape::Text(key) => key.into_owned(),
            other => {
                return Err(Error::NonStringKey {
                    found: other.describe().to_string(),
                });
            }
        };
        table.insert(key, normalize(value)?);
    }
    Ok(table)
}

fn as_dyn<T: Structured>(value: &T) -> &dyn Structured {
    value
}

impl Structured for Value {
    fn shape(&self) -> Shape<'_> {
        match self {
            Value::String(s) => Shape::Text(Cow::Borrowed(s)),
            Value::Integer(i) => Shape::Integer(*i),
            Value::Float(f) => Shape::Float(*f),
            Value::Boolean(b) => Shape::Boolean(*b),
            Value::Array(items) => items.shape(),
            Value::Table(table) => table.shape(),
        }
    }
}

impl Structured for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Text(Cow::Borrowed(self))
    }
}

impl Structured for Cow<'_, str> {
    fn shape(&self) -> Shape<'_> {
        Shape::Text(Cow::Borrowed(self))
    }
}

impl Structured for str {
    fn shape(&self) -> Shape<'_> {
        Shape::Text(Cow::Borrowed(self))
    }
}

impl Structured for char {
    fn shape(&self) -> Shape<'_> {
        Shape::Text(Cow::Owned(self.to_string()))
    }
}

impl Structured for bool {
    fn shape(&self) -> Shape<'_> {
        Shape::Boolean(*self)
    }
}

impl Structured for f64 {
    fn shape(&self) -> Shape<'_> {
        if self.is_nan() {
            Shape::Nan
        } else {
            Shape::Float(*self)
        }
    }
}

impl Structured for f32 {
    fn shape(&self) -> Shape<'_> {
        if self.is_nan() {
            Shape::Nan
        } else {
            Shape::Float(f64::from(*self))
        }
    }
}

macro_rules! structured_small_int {
    ($($ty:ty),*) => {
        $(
            impl Structured for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Integer(i64::from(*self))
                }
            }
        )*
    };
}

structured_small_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! structured_wide_int {
    ($($ty:ty),*) => {
        $(
            impl Structured for $ty {
                fn shape(&self) -> Shape<'_> {
                    match i64::try_from(*self) {
                        Ok(i) => Shape::Integer(i),
                        Err(_) => Shape::Unsupported("integer out of range"),
                    }
                }
            }
        )*
    };
}

structured_wide_int!(u64, usize, isize, i128, u128);

impl Structured for () {
    fn shape(&self) -> Shape<'_> {
        Shape::Unsupported("unit")
    }
}

impl<T: Structured> Structured for Option<T> {
    fn shape(&self) -> Shape<'_> {
        match self {
            Some(value) => value.shape(),
            None => Shape::Unsupported("none"),
        }
    }
}

impl<T: Structured + ?Sized> Structured for &T {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Structured + ?Sized> Structured for Box<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Structured> Structured for [T] {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(Box::new(self.iter().map(as_dyn)))
    }
}

impl<T: Structured, const N: usize> Structured for [T; N] {
    fn shape(&self) -> Shape<'_> {
        self.as_slice().shape()
    }
}

impl<T: Structured> Structured for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        self.as_slice().shape()
    }
}

impl<K: Structured, V: Structured> Structured for BTreeMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        Shape::Mapping(Box::new(self.iter().map(|(k, v)| (as_dyn(k), as_dyn(v)))))
    }
}

impl<K: Structured, V: Structured, S> Structured for HashMap<K, V, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::Mapping(Box::new(self.iter().map(|(k, v)| (as_dyn(k), as_dyn(v)))))
    }
}

impl Structured for toml::Value {
    fn shape(&self) -> Shape<'_> {
        match self {
            toml::Value::String(s) => Shape::Text(Cow::Borrowed(s)),
            toml::Value::Integer(i) => Shape::Integer(*i),
            toml::Value::Float(f) => f.shape(),
            toml::Value::Boolean(b) => Shape::Boolean(*b),
            toml::Value::Datetime(d) => Shape::Text(Cow::Owned(d.to_string())),
            toml::Value::Array(items) => items.shape(),
            toml::Value::Table(table) => table.shape(),
        }
    }
}

impl Structured for toml::Table {
    fn shape(&self) -> Shape<'_> {
        Shape::Mapping(Box::new(self.iter().map(|(k, v)| (as_dyn(k), as_dyn(v)))))
    }
}

impl Structured for serde_json::Value {
    fn shape(&self) -> Shape<'_> {
        match self {
            serde_json::Value::Null => Shape::Unsupported("null"),
            serde_json::Value::Bool(b) => Shape::Boolean(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Shape::Integer(i)
                } else if n.is_u64() {
                    Shape::Unsupported("integer out of range")
                } else {
                    n.as_f64().map_or(Shape::Nan, Shape::Float)
                }
            }
            serde_json::Value::String(s) => Shape::Text(Cow::Borrowed(s)),
            serde_json::Value::Array(items) => items.shape(),
            serde_json::Value::Object(map) => {
                Shape::Mapping(Box::new(map.iter().map(|(k, v)| (as_dyn(k), as_dyn(v)))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[derive(Clone, Copy)]
    enum Mode {
        Fast,
        Safe,
    }

    impl Structured for Mode {
        fn shape(&self) -> Shape<'_> {
            Shape::Text(Cow::Borrowed(match self {
                Mode::Fast => "fast",
                Mode::Safe => "safe",
            }))
        }
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(normalize(&"x").unwrap(), Value::from("x"));
        assert_eq!(normalize(&7_u8).unwrap(), Value::Integer(7));
        assert_eq!(normalize(&true).unwrap(), Value::Boolean(true));
        assert_eq!(normalize(&2.5_f32).unwrap(), Value::Float(2.5));
    }

    #[test]
    fn test_nan_is_canonical() {
        let value = normalize(&f32::NAN).unwrap();
        assert!(value.is_nan());
        assert_eq!(value, Value::Float(f64::NAN));
    }

    #[test]
    fn test_enum_like_values_become_strings() {
        let modes = vec![Mode::Fast, Mode::Safe];
        assert_eq!(
            normalize(&modes).unwrap(),
            Value::Array(vec![Value::from("fast"), Value::from("safe")])
        );
    }

    #[test]
    fn test_non_string_key_rejected() {
        let mut inner = BTreeMap::new();
        inner.insert(1, "x");
        let mut outer = BTreeMap::new();
        outer.insert("a", inner);

        let err = normalize(&outer).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert!(matches!(err, Error::NonStringKey { .. }));
    }

    #[test]
    fn test_enum_keys_accepted() {
        let mut map = HashMap::new();
        map.insert('k', 1);
        let table = normalize_table(&map).unwrap();
        assert_eq!(table["k"], Value::Integer(1));
    }

    #[test]
    fn test_none_rejected() {
        let err = normalize(&vec![Some(1), None]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedValue { ref found } if found == "none"));
    }

    #[test]
    fn test_wide_integer_rejected() {
        let err = normalize(&u64::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn test_top_level_must_be_table() {
        let err = normalize_table(&vec![1, 2]).unwrap_err();
        assert!(matches!(err, Error::NotATable { .. }));
    }

    #[test]
    fn test_json_null_rejected() {
        let json = serde_json::json!({"a": null});
        assert!(normalize(&json).is_err());
    }

    #[test]
    fn test_toml_datetime_becomes_string() {
        let table: toml::Table = toml::from_str("when = 1979-05-27T07:32:00Z").unwrap();
        let table = normalize_table(&table).unwrap();
        assert_eq!(table["when"], Value::from("1979-05-27T07:32:00Z"));
    }

    #[test]
    fn test_display_is_inline() {
        let mut table = Table::new();
        table.insert("a".into(), Value::Array(vec![Value::Integer(1), Value::Float(f64::NAN)]));
        table.insert("b".into(), Value::from("x"));
        assert_eq!(Value::Table(table).to_string(), r#"{ a = [1, nan], b = "x" }"#);
    }
}
