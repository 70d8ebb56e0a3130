//! Built-in filters and the registry an [`Environment`](super::Environment) carries.

use crate::value::Value;
use cruet::Inflector;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// A filter receives the piped value and its call arguments.
pub type FilterFn = dyn Fn(&Value, &[Value]) -> Value + Send + Sync;

/// Named filter registry.
#[derive(Clone, Default)]
pub struct Filters {
    entries: IndexMap<String, Arc<FilterFn>>,
}

impl fmt::Debug for Filters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.keys()).finish()
    }
}

impl Filters {
    /// An empty registry.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with every built-in filter.
    pub fn builtin() -> Self {
        let mut filters = Self::empty();
        filters.add("default", default);
        filters.add("d", default);
        filters.add("join", join);
        filters.add("length", length);
        filters.add("count", length);
        filters.add("lower", |v, _| map_str(v, str::to_lowercase));
        filters.add("upper", |v, _| map_str(v, str::to_uppercase));
        filters.add("trim", |v, _| map_str(v, |s| s.trim().to_string()));
        filters.add("capitalize", |v, _| map_str(v, capitalize));
        filters.add("title", |v, _| map_str(v, |s| s.to_title_case()));
        filters.add("snake_case", |v, _| map_str(v, |s| s.to_snake_case()));
        filters.add("kebab_case", |v, _| map_str(v, |s| s.to_kebab_case()));
        filters.add("camel_case", |v, _| map_str(v, |s| s.to_camel_case()));
        filters.add("pascal_case", |v, _| map_str(v, |s| s.to_pascal_case()));
        filters.add("replace", replace);
        filters.add("first", |v, _| first_or_last(v, true));
        filters.add("last", |v, _| first_or_last(v, false));
        filters.add("string", |v, _| Value::String(v.to_string()));
        filters.add("int", |v, _| v.as_i64().map(Value::from).unwrap_or_else(|| Value::from(0)));
        filters.add("tojson", tojson);
        filters
    }

    pub fn add<F>(&mut self, name: &str, filter: F)
    where
        F: Fn(&Value, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.entries.insert(name.to_string(), Arc::new(filter));
    }

    pub fn get(&self, name: &str) -> Option<&FilterFn> {
        self.entries.get(name).map(|f| f.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Applies a filter; unknown names pass the value through unchanged.
    pub fn apply(&self, name: &str, value: &Value, args: &[Value]) -> Value {
        match self.get(name) {
            Some(filter) => filter(value, args),
            None => value.clone(),
        }
    }
}

/// `default(fallback, boolean=false)`: replaces a missing value, or any
/// falsy value when the second argument is true.
fn default(value: &Value, args: &[Value]) -> Value {
    let fallback = args.first().cloned().unwrap_or_else(|| Value::from(""));
    let on_falsy = args.get(1).map(Value::is_true).unwrap_or(false);
    if value.is_none() || (on_falsy && !value.is_true()) {
        fallback
    } else {
        value.clone()
    }
}

fn join(value: &Value, args: &[Value]) -> Value {
    let sep = args.first().map(|s| s.to_string()).unwrap_or_default();
    match value {
        Value::Seq(items) => {
            Value::String(items.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(&sep))
        }
        Value::Map(map) => {
            Value::String(map.keys().map(String::as_str).collect::<Vec<_>>().join(&sep))
        }
        Value::None => Value::from(""),
        other => Value::String(other.to_string()),
    }
}

fn length(value: &Value, _: &[Value]) -> Value {
    Value::from(value.len().unwrap_or(0))
}

fn map_str(value: &Value, f: impl Fn(&str) -> String) -> Value {
    match value {
        Value::None => Value::None,
        Value::String(s) => Value::String(f(s)),
        other => Value::String(f(&other.to_string())),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn replace(value: &Value, args: &[Value]) -> Value {
    let (Some(from), Some(to)) = (args.first(), args.get(1)) else {
        return value.clone();
    };
    let (from, to) = (from.to_string(), to.to_string());
    map_str(value, |s| s.replace(&from, &to))
}

fn first_or_last(value: &Value, first: bool) -> Value {
    let items = value.iter_items();
    let picked = if first { items.first() } else { items.last() };
    picked.cloned().unwrap_or_default()
}

fn tojson(value: &Value, _: &[Value]) -> Value {
    serde_json::to_string(value).map(Value::String).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(name: &str, value: impl Into<Value>, args: &[Value]) -> Value {
        Filters::builtin().apply(name, &value.into(), args)
    }

    #[test]
    fn test_default() {
        assert_eq!(call("default", Value::None, &["x".into()]), Value::from("x"));
        assert_eq!(call("default", "", &["x".into()]), Value::from(""));
        assert_eq!(call("default", "", &["x".into(), true.into()]), Value::from("x"));
        assert_eq!(call("default", 0, &[5.into()]), Value::from(0));
        assert_eq!(call("default", Value::None, &[]), Value::from(""));
    }

    #[test]
    fn test_join() {
        let plugins = Value::from(vec!["pydantic.mypy", "sqlalchemy.ext.mypy.plugin"]);
        assert_eq!(
            call("join", plugins, &[", ".into()]),
            Value::from("pydantic.mypy, sqlalchemy.ext.mypy.plugin")
        );
        assert_eq!(call("join", vec![1, 2], &[]), Value::from("12"));
        assert_eq!(call("join", Vec::<Value>::new(), &[",".into()]), Value::from(""));
    }

    #[test]
    fn test_string_filters() {
        assert_eq!(call("upper", "abc", &[]), Value::from("ABC"));
        assert_eq!(call("capitalize", "hELLO", &[]), Value::from("Hello"));
        assert_eq!(call("trim", "  x ", &[]), Value::from("x"));
        assert_eq!(call("replace", "a-b-c", &["-".into(), "_".into()]), Value::from("a_b_c"));
        assert_eq!(call("snake_case", "My Project", &[]), Value::from("my_project"));
        assert_eq!(call("kebab_case", "My Project", &[]), Value::from("my-project"));
        assert_eq!(call("lower", Value::None, &[]), Value::None);
    }

    #[test]
    fn test_length_first_last() {
        assert_eq!(call("length", vec!["a", "b"], &[]), Value::from(2));
        assert_eq!(call("length", Value::None, &[]), Value::from(0));
        assert_eq!(call("first", vec!["a", "b"], &[]), Value::from("a"));
        assert_eq!(call("last", vec!["a", "b"], &[]), Value::from("b"));
    }

    #[test]
    fn test_tojson() {
        let value = Value::from(json!({"a": [1, true, null]}));
        assert_eq!(call("tojson", value, &[]), Value::from(r#"{"a":[1,true,null]}"#));
    }

    #[test]
    fn test_custom_filter() {
        let mut filters = Filters::empty();
        filters.add("shout", |v, _| Value::String(format!("{v}!")));
        assert!(filters.contains("shout"));
        assert!(!filters.contains("upper"));
        assert_eq!(filters.apply("shout", &"hi".into(), &[]), Value::from("hi!"));
    }
}
