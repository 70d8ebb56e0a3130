//! Render contexts and the builder that merges user options with the
//! defaults a template declares.

use crate::value::Value;
use indexmap::IndexMap;
use log::trace;
use serde::{Deserialize, Serialize};

/// Insertion-ordered mapping of option name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    vars: IndexMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.vars.insert(key.into(), value.into());
    }

    /// Builder-style insert.
    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.vars.iter()
    }

    /// Builds a context from a JSON object. Non-object values give an
    /// empty context.
    pub fn from_json(value: serde_json::Value) -> Self {
        match Value::from(value) {
            Value::Map(vars) => Self { vars },
            _ => Self::default(),
        }
    }
}

impl From<IndexMap<String, Value>> for Context {
    fn from(vars: IndexMap<String, Value>) -> Self {
        Self { vars }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

impl IntoIterator for Context {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.into_iter()
    }
}

/// Fills options the caller did not supply with a template's declared defaults.
///
/// A supplied value always replaces the default wholesale. Nested mappings
/// and sequences are never merged, so a custom `third_party` table drops the
/// built-in entries entirely.
#[derive(Debug, Clone, Default)]
pub struct ContextBuilder {
    defaults: Context,
}

impl ContextBuilder {
    pub fn new(defaults: Context) -> Self {
        Self { defaults }
    }

    pub fn build(&self, user_options: &Context) -> Context {
        let mut vars = self.defaults.vars.clone();
        for (key, value) in user_options.iter() {
            if vars.contains_key(key) {
                trace!("option '{key}' overrides its default");
            }
            vars.insert(key.clone(), value.clone());
        }
        Context { vars }
    }
}
