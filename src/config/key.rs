//! Configuration key normalization.
//!
//! Keys reach the resolver from three places: the built-in defaults, the
//! caller's initial overrides and the parsed YAML file. YAML keys can be
//! strings, numbers or booleans, so every key is normalized into a
//! [`ConfigKey`] before any merge or lookup.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

/// A resolved configuration mapping.
pub type ConfigMap = BTreeMap<ConfigKey, Value>;

/// Canonical identifier for a configuration setting.
///
/// Two keys are equal iff their textual forms are equal, so `push_api_key`
/// written in a YAML file and `"push_api_key"` passed in code are the same
/// key.
///
/// # Example
///
/// ```
/// use appsignal_config::config::ConfigKey;
///
/// let key = ConfigKey::new("endpoint");
/// assert_eq!(key.as_str(), "endpoint");
/// assert_eq!(key, ConfigKey::from("endpoint"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Create a key from its textual form.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Normalize a YAML mapping key.
    ///
    /// Scalars map to their surface text; tags are looked through.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` for null, sequence and mapping keys.
    pub fn from_yaml(key: &Value) -> Result<Self> {
        match key {
            Value::String(s) => Ok(Self(s.clone())),
            Value::Number(n) => Ok(Self(n.to_string())),
            Value::Bool(b) => Ok(Self(b.to_string())),
            Value::Tagged(tagged) => Self::from_yaml(&tagged.value),
            Value::Null | Value::Sequence(_) | Value::Mapping(_) => Err(ConfigError::InvalidKey {
                key: describe(key),
            }),
        }
    }

    /// The textual form of this key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ConfigKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConfigKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ConfigKey {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Normalize every key of a YAML mapping.
///
/// When two keys share a textual form (`1` and `"1"`), the later one in
/// document order wins.
pub fn normalize_keys(mapping: &Mapping) -> Result<ConfigMap> {
    mapping
        .iter()
        .map(|(key, value)| Ok((ConfigKey::from_yaml(key)?, value.clone())))
        .collect()
}

/// Whether a setting counts as set.
///
/// Only null and `false` are falsy; `0`, `""` and `"false"` are all truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::Tagged(tagged) => is_truthy(&tagged.value),
        _ => true,
    }
}

fn describe(key: &Value) -> String {
    serde_yaml::to_string(key)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_else(|_| format!("{:?}", key))
}
