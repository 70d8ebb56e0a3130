//! Tagged value model used by contexts and the template evaluator.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;
use std::cmp::Ordering;
use std::fmt;

/// A context value.
///
/// `None` stands for both an explicit null and an absent variable; the
/// evaluator never distinguishes the two.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Number(Number),
    String(String),
    Seq(Vec<Value>),
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Creates a value from anything serde can serialize.
    /// Unserializable input degrades to `Value::None`.
    pub fn from_serialize<T: Serialize>(value: &T) -> Value {
        serde_json::to_value(value).map(Value::from).unwrap_or_default()
    }

    /// Truthiness: empty strings, empty collections, `false`, zero and none are false.
    pub fn is_true(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
            Value::String(s) => !s.is_empty(),
            Value::Seq(items) => !items.is_empty(),
            Value::Map(map) => !map.is_empty(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::Bool(b) => Some(i64::from(*b)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Name of the variant, as used by `is` tests.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "mapping",
        }
    }

    /// Number of items for collections, characters for strings.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.chars().count()),
            Value::Seq(items) => Some(items.len()),
            Value::Map(map) => Some(map.len()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Attribute lookup (`a.b`). Only mappings have attributes.
    pub fn get_attr(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(name),
            _ => None,
        }
    }

    /// Subscript lookup (`a["b"]`, `a[0]`, `a[-1]`).
    pub fn get_item(&self, key: &Value) -> Option<&Value> {
        match (self, key) {
            (Value::Map(map), Value::String(k)) => map.get(k.as_str()),
            (Value::Map(map), other) => map.get(other.to_string().as_str()),
            (Value::Seq(items), index) => {
                let index = index.as_i64()?;
                let index = if index < 0 { items.len() as i64 + index } else { index };
                usize::try_from(index).ok().and_then(|i| items.get(i))
            }
            _ => None,
        }
    }

    /// Items produced when the value drives a single-variable `for` loop.
    /// Maps yield their keys, strings their characters, scalars nothing.
    pub fn iter_items(&self) -> Vec<Value> {
        match self {
            Value::Seq(items) => items.clone(),
            Value::Map(map) => map.keys().map(|k| Value::String(k.clone())).collect(),
            Value::String(s) => s.chars().map(|c| Value::String(c.to_string())).collect(),
            _ => Vec::new(),
        }
    }

    /// Key/value pairs for two-variable loops. Sequences of two-item
    /// sequences unpack; maps yield their entries in insertion order.
    pub fn iter_pairs(&self) -> Vec<(Value, Value)> {
        match self {
            Value::Map(map) => {
                map.iter().map(|(k, v)| (Value::String(k.clone()), v.clone())).collect()
            }
            Value::Seq(items) => items
                .iter()
                .map(|item| match item {
                    Value::Seq(pair) => (
                        pair.first().cloned().unwrap_or_default(),
                        pair.get(1).cloned().unwrap_or_default(),
                    ),
                    other => (other.clone(), Value::None),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Equality with numeric coercion (`1 == 1.0`).
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
                (Some(a), Some(b)) => a == b,
                _ => a.as_f64() == b.as_f64(),
            },
            (Value::Seq(a), Value::Seq(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loose_eq(y))
            }
            _ => self == other,
        }
    }

    /// Ordering for `<`-style comparisons; `None` when the kinds differ.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Membership test backing the `in` operator.
    pub fn contains(&self, needle: &Value) -> bool {
        match self {
            Value::String(haystack) => match needle {
                Value::String(n) => haystack.contains(n.as_str()),
                _ => false,
            },
            Value::Seq(items) => items.iter().any(|item| item.loose_eq(needle)),
            Value::Map(map) => needle.as_str().map(|k| map.contains_key(k)).unwrap_or(false),
            _ => false,
        }
    }

    fn write_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "'{}'", s.replace('\'', "\\'")),
            Value::None => f.write_str("None"),
            other => write!(f, "{other}"),
        }
    }
}

/// Rendering form used by `{{ ... }}` output.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => Ok(()),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.write_repr(f)?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "'{k}': ")?;
                    v.write_repr(f)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::None,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Seq(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::None => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Seq(items) => serde_json::Value::Array(items.iter().map(Into::into).collect()),
            Value::Map(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.into())).collect(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde_json::Value::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number((n as u64).into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Number::from_f64(f).map(Value::Number).unwrap_or_default()
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

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!Value::None.is_true());
        assert!(!Value::from(false).is_true());
        assert!(!Value::from(0).is_true());
        assert!(!Value::from(0.0).is_true());
        assert!(!Value::from("").is_true());
        assert!(!Value::from(Vec::<Value>::new()).is_true());
        assert!(!Value::Map(IndexMap::new()).is_true());

        assert!(Value::from(true).is_true());
        assert!(Value::from(-1).is_true());
        assert!(Value::from("False").is_true());
        assert!(Value::from(vec![""]).is_true());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::None.to_string(), "");
        assert_eq!(Value::from(true).to_string(), "True");
        assert_eq!(Value::from(8000).to_string(), "8000");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(vec!["a", "b"]).to_string(), "['a', 'b']");
        assert_eq!(Value::from(json!({"k": 1})).to_string(), "{'k': 1}");
    }

    #[test]
    fn test_json_map_keeps_insertion_order() {
        let value = Value::from(json!({"zeta": 1, "alpha": 2, "mid": 3}));
        let keys: Vec<String> = value.iter_items().iter().map(|k| k.to_string()).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_get_item() {
        let seq = Value::from(vec![1, 2, 3]);
        assert_eq!(seq.get_item(&Value::from(0)), Some(&Value::from(1)));
        assert_eq!(seq.get_item(&Value::from(-1)), Some(&Value::from(3)));
        assert_eq!(seq.get_item(&Value::from(7)), None);

        let map = Value::from(json!({"a": {"b": true}}));
        let inner = map.get_item(&Value::from("a")).unwrap();
        assert_eq!(inner.get_attr("b"), Some(&Value::from(true)));
        assert_eq!(inner.get_attr("missing"), None);
    }

    #[test]
    fn test_loose_eq_and_contains() {
        assert!(Value::from(1).loose_eq(&Value::from(1.0)));
        assert!(!Value::from("1").loose_eq(&Value::from(1)));
        assert!(Value::from("postgresql").contains(&Value::from("postgres")));
        assert!(Value::from(vec!["a", "b"]).contains(&Value::from("b")));
        assert!(Value::from(json!({"k": 0})).contains(&Value::from("k")));
        assert!(!Value::from(3).contains(&Value::from(3)));
    }
}
