//! Config file discovery and loading.
//!
//! The file lives at a fixed location under the application root and holds
//! one section per environment:
//!
//! ```yaml
//! production:
//!   push_api_key: "${APPSIGNAL_PUSH_API_KEY}"
//!   active: true
//! staging:
//!   push_api_key: abc123
//!   active: false
//! ```

use super::defaults::{API_KEY, PUSH_API_KEY};
use super::interpolation::{find_erb_tag, render_template, TemplateContext};
use super::key::{is_truthy, normalize_keys, ConfigKey, ConfigMap};
use crate::error::{ConfigError, Result};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Location of the config file relative to the application root.
pub const CONFIG_FILE: [&str; 2] = ["config", "appsignal.yml"];

/// Path of the config file for an application root.
pub fn config_file_path(root: &Path) -> PathBuf {
    CONFIG_FILE.iter().fold(root.to_path_buf(), |p, part| p.join(part))
}

/// Read, render and parse the config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `UnsupportedTemplate` if the file contains ERB tags.
/// Returns `ConfigParseError` if the rendered text is not valid YAML.
pub fn load_document(path: &Path, context: &TemplateContext) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io(e)
        }
    })?;

    if let Some(tag) = find_erb_tag(&content) {
        return Err(ConfigError::UnsupportedTemplate {
            path: path.to_path_buf(),
            tag: tag.to_string(),
        });
    }

    parse_document(&render_template(&content, context), path)
}

/// Parse rendered YAML content.
///
/// # Arguments
///
/// * `content` - The rendered YAML content
/// * `source_path` - Path for error reporting
pub fn parse_document(content: &str, source_path: &Path) -> Result<Value> {
    serde_yaml::from_str(content).map_err(|e| ConfigError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Extract and normalize the section for `env`.
///
/// A missing, null or `false` entry means the environment is not
/// configured. So does a document that is not a mapping at all, such as an
/// empty file.
pub fn environment_section(document: &Value, env: &str) -> Result<ConfigMap> {
    let not_configured = || ConfigError::EnvironmentNotConfigured {
        env: env.to_string(),
    };

    let section = document
        .as_mapping()
        .and_then(|environments| environments.get(env))
        .ok_or_else(not_configured)?;

    match section {
        Value::Mapping(settings) => normalize_keys(settings),
        Value::Tagged(tagged) => match &tagged.value {
            Value::Mapping(settings) => normalize_keys(settings),
            _ => Err(ConfigError::InvalidEnvironmentSection {
                env: env.to_string(),
            }),
        },
        Value::Null | Value::Bool(false) => Err(not_configured()),
        _ => Err(ConfigError::InvalidEnvironmentSection {
            env: env.to_string(),
        }),
    }
}

/// Copy a legacy `api_key` to `push_api_key` when only the former is set.
///
/// Null and `false` count as unset for both keys.
pub fn apply_legacy_api_key(mut section: ConfigMap) -> ConfigMap {
    let has_push_key = section.get(PUSH_API_KEY).is_some_and(is_truthy);

    if !has_push_key {
        if let Some(legacy) = section.get(API_KEY).filter(|v| is_truthy(v)).cloned() {
            section.insert(ConfigKey::new(PUSH_API_KEY), legacy);
        }
    }

    section
}

/// Load the settings for `env` from the config file at `path`.
pub fn load_file_config(path: &Path, env: &str, context: &TemplateContext) -> Result<ConfigMap> {
    let document = load_document(path, context)?;
    let section = environment_section(&document, env)?;
    Ok(apply_legacy_api_key(section))
}
