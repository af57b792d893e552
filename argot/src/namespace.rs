use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::value::{FromValue, Value};

/// The typed result set a successful parse produces: canonical key to
/// value. Pure data holder, owned by the caller.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    values: HashMap<String, Value>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.values.insert(key.into(), value.into());
    }

    /// Typed read; fails with `KeyNotFound` when absent and
    /// `TypeMismatch` when the stored type differs from `T`.
    pub fn get<T: FromValue>(&self, key: &str) -> Result<T> {
        match self.values.get(key) {
            Some(value) => value.get(),
            None => Err(Error::KeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// Typed read with a fallback for absent (or empty) keys. A present
    /// value of the wrong type is still a `TypeMismatch`.
    pub fn get_or<T: FromValue>(&self, key: &str, default: T) -> Result<T> {
        match self.values.get(key) {
            Some(value) if !value.is_empty() => value.get(),
            _ => Ok(default),
        }
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.has(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.values.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
