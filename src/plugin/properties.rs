//! Interceptor properties.
//!
//! A [`Properties`] bag is handed to [`Interceptor::set_properties`] before an
//! interceptor is registered. Whoever assembles the chain decides where the
//! values come from; this crate never reads configuration files itself.
//!
//! [`Interceptor::set_properties`]: super::Interceptor::set_properties

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::PluginError;

/// String-keyed configuration values for a single interceptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
    values: HashMap<String, Value>,
}

impl Properties {
    /// Create an empty property bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Raw value for `key`.
    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Typed value for `key`; `Ok(None)` when absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PluginError> {
        self.values
            .get(key)
            .map(|v| {
                T::deserialize(v).map_err(|e| PluginError::InvalidProperty {
                    key: key.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }

    /// Typed value for `key`, or `default` when absent.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, PluginError> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// String value for `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Typed value for `key`; absence is an error.
    pub fn require<T: DeserializeOwned>(&self, key: &str) -> Result<T, PluginError> {
        self.get(key)?.ok_or_else(|| PluginError::InvalidProperty {
            key: key.to_string(),
            reason: "property is required".to_string(),
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
