//! Environment variable source.
//!
//! When no config file exists, the push API key is taken from the process
//! environment. Tests and embedders can supply an explicit map instead.

use super::defaults::{ACTIVE, PUSH_API_KEY};
use super::interpolation::TemplateContext;
use super::key::{ConfigKey, ConfigMap};
use serde_yaml::Value;
use std::collections::HashMap;

/// Primary credential variable.
pub const PUSH_API_KEY_ENV: &str = "APPSIGNAL_PUSH_API_KEY";

/// Deprecated credential variable, still honored.
pub const DEPRECATED_API_KEY_ENV: &str = "APPSIGNAL_API_KEY";

/// Where environment variables are read from.
#[derive(Debug, Clone, Default)]
pub enum EnvSource {
    /// The current process environment.
    #[default]
    System,
    /// An explicit set of variables.
    Vars(HashMap<String, String>),
}

impl EnvSource {
    /// Look up one variable. An empty value counts as set.
    pub fn var(&self, name: &str) -> Option<String> {
        match self {
            EnvSource::System => {
                std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
            }
            EnvSource::Vars(vars) => vars.get(name).cloned(),
        }
    }

    /// Build the context used to render the config file.
    pub fn template_context(&self) -> TemplateContext {
        match self {
            EnvSource::System => TemplateContext::from_system_env(),
            EnvSource::Vars(vars) => TemplateContext::new(vars.clone()),
        }
    }
}

/// A push API key found in the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvCredential {
    /// The key itself.
    pub value: String,
    /// Read from [`DEPRECATED_API_KEY_ENV`] rather than [`PUSH_API_KEY_ENV`].
    pub deprecated: bool,
}

impl EnvCredential {
    /// The layer this credential contributes: the key plus `active: true`.
    pub fn to_layer(&self) -> ConfigMap {
        let mut layer = ConfigMap::new();
        layer.insert(ConfigKey::new(PUSH_API_KEY), Value::from(self.value.as_str()));
        layer.insert(ConfigKey::new(ACTIVE), Value::Bool(true));
        layer
    }
}

/// Find the push API key, preferring the primary variable.
pub fn find_credential(env: &EnvSource) -> Option<EnvCredential> {
    if let Some(value) = env.var(PUSH_API_KEY_ENV) {
        return Some(EnvCredential {
            value,
            deprecated: false,
        });
    }

    env.var(DEPRECATED_API_KEY_ENV).map(|value| EnvCredential {
        value,
        deprecated: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> EnvSource {
        EnvSource::Vars(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn primary_variable_is_found() {
        let credential = find_credential(&vars(&[(PUSH_API_KEY_ENV, "abc123")])).unwrap();
        assert_eq!(credential.value, "abc123");
        assert!(!credential.deprecated);
    }

    #[test]
    fn deprecated_variable_is_found_and_flagged() {
        let credential = find_credential(&vars(&[(DEPRECATED_API_KEY_ENV, "xyz")])).unwrap();
        assert_eq!(credential.value, "xyz");
        assert!(credential.deprecated);
    }

    #[test]
    fn primary_variable_wins_over_deprecated() {
        let env = vars(&[(PUSH_API_KEY_ENV, "new"), (DEPRECATED_API_KEY_ENV, "old")]);
        let credential = find_credential(&env).unwrap();
        assert_eq!(credential.value, "new");
        assert!(!credential.deprecated);
    }

    #[test]
    fn empty_value_counts_as_set() {
        let credential = find_credential(&vars(&[(PUSH_API_KEY_ENV, "")])).unwrap();
        assert_eq!(credential.value, "");
    }

    #[test]
    fn no_variables_means_no_credential() {
        assert!(find_credential(&vars(&[("UNRELATED", "1")])).is_none());
    }

    #[test]
    fn layer_sets_key_and_active() {
        let credential = EnvCredential {
            value: "abc123".into(),
            deprecated: false,
        };
        let layer = credential.to_layer();

        assert_eq!(layer.len(), 2);
        assert_eq!(layer[PUSH_API_KEY], "abc123");
        assert_eq!(layer[ACTIVE], true);
    }

    #[test]
    fn template_context_uses_explicit_vars() {
        let context = vars(&[("HOST", "example.com")]).template_context();
        assert_eq!(context.resolve("HOST"), Some("example.com"));
        assert_eq!(context.resolve("PATH"), None);
    }
}
