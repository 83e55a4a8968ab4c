//! Configuration resolution.
//!
//! A [`Config`] is resolved once, when it is built, from the first source
//! that applies:
//!
//! 1. The config file at `<root>/config/appsignal.yml`
//! 2. `APPSIGNAL_PUSH_API_KEY`
//! 3. `APPSIGNAL_API_KEY` (deprecated)
//!
//! The chosen source is layered over the built-in defaults and the caller's
//! initial config. Nothing here returns an error: if no source applies, or
//! the file is broken, the config stays unloaded and one line is logged.

use super::defaults::{ACTIVE, DEFAULT_CONFIG, PUSH_API_KEY};
use super::environment::{
    find_credential, EnvSource, DEPRECATED_API_KEY_ENV, PUSH_API_KEY_ENV,
};
use super::key::{is_truthy, ConfigMap};
use super::loader::{config_file_path, load_file_config};
use super::merger::merge_layers;
use crate::error::{ConfigError, Result};
use crate::logging::{log_carefully, LogLevel, Logger, TracingLogger};
use serde_yaml::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where the resolved settings came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// The environment's section of the config file.
    File,
    /// `APPSIGNAL_PUSH_API_KEY`.
    PushApiKeyEnv,
    /// The deprecated `APPSIGNAL_API_KEY`.
    DeprecatedApiKeyEnv,
    /// Resolution failed; nothing is loaded.
    Unresolved,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File => write!(f, "config file"),
            ConfigSource::PushApiKeyEnv => write!(f, "{}", PUSH_API_KEY_ENV),
            ConfigSource::DeprecatedApiKeyEnv => write!(f, "{}", DEPRECATED_API_KEY_ENV),
            ConfigSource::Unresolved => write!(f, "unresolved"),
        }
    }
}

/// Resolved agent configuration for one environment.
///
/// # Example
///
/// ```
/// use appsignal_config::config::Config;
/// use appsignal_config::logging::MemoryLogger;
/// use std::collections::HashMap;
///
/// let temp = tempfile::TempDir::new().unwrap();
/// let mut env = HashMap::new();
/// env.insert("APPSIGNAL_PUSH_API_KEY".to_string(), "abc123".to_string());
///
/// let logger = MemoryLogger::new();
/// let config = Config::builder(temp.path(), "production")
///     .env_vars(env)
///     .logger(&logger)
///     .build();
///
/// assert!(config.is_loaded());
/// assert!(config.is_active());
/// assert_eq!(config.push_api_key(), Some("abc123"));
/// assert!(logger.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    root_path: PathBuf,
    env: String,
    initial_config: ConfigMap,
    config_file: PathBuf,
    source: ConfigSource,
    resolved: Option<ConfigMap>,
}

impl Config {
    /// Resolve with no initial config, the tracing logger and the process
    /// environment.
    pub fn new(root_path: impl AsRef<Path>, env: impl fmt::Display) -> Self {
        Self::builder(root_path, env).build()
    }

    /// Start configuring a resolution.
    pub fn builder<'a>(root_path: impl AsRef<Path>, env: impl fmt::Display) -> ConfigBuilder<'a> {
        ConfigBuilder {
            root_path: root_path.as_ref().to_path_buf(),
            env: env.to_string(),
            initial_config: ConfigMap::new(),
            logger: None,
            env_source: EnvSource::System,
        }
    }

    /// Whether resolution succeeded.
    pub fn is_loaded(&self) -> bool {
        self.resolved.is_some()
    }

    /// Look up a setting.
    ///
    /// Returns `None` when the key is missing or nothing is loaded.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.resolved.as_ref()?.get(key)
    }

    /// Whether the agent should run, based on the `active` setting.
    pub fn is_active(&self) -> bool {
        self.get(ACTIVE).is_some_and(is_truthy)
    }

    /// The push API key, if it is set to a string.
    pub fn push_api_key(&self) -> Option<&str> {
        self.get(PUSH_API_KEY)?.as_str()
    }

    /// The full resolved mapping.
    pub fn config_map(&self) -> Option<&ConfigMap> {
        self.resolved.as_ref()
    }

    pub fn source(&self) -> ConfigSource {
        self.source
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    pub fn initial_config(&self) -> &ConfigMap {
        &self.initial_config
    }

    /// Path the config file was looked for at.
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }
}

/// Builder for [`Config`].
///
/// Every input is fixed before [`build`](ConfigBuilder::build) runs the
/// resolution; the resulting `Config` never changes.
pub struct ConfigBuilder<'a> {
    root_path: PathBuf,
    env: String,
    initial_config: ConfigMap,
    logger: Option<&'a dyn Logger>,
    env_source: EnvSource,
}

impl<'a> ConfigBuilder<'a> {
    /// Settings that override the defaults but yield to the resolved source.
    pub fn initial_config(mut self, initial_config: ConfigMap) -> Self {
        self.initial_config = initial_config;
        self
    }

    /// Where failures and deprecation notices are reported.
    ///
    /// Defaults to [`TracingLogger`].
    pub fn logger(mut self, logger: &'a dyn Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Read environment variables from `vars` instead of the process.
    ///
    /// Applies to both the credential lookup and config file templates.
    pub fn env_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.env_source = EnvSource::Vars(vars);
        self
    }

    /// Resolve the configuration.
    pub fn build(self) -> Config {
        let logger: &dyn Logger = self.logger.unwrap_or(&TracingLogger);
        let config_file = config_file_path(&self.root_path);

        let (source, resolved) = match resolve(
            &config_file,
            &self.env,
            &self.initial_config,
            &self.env_source,
        ) {
            Ok((source, resolved)) => {
                if source == ConfigSource::DeprecatedApiKeyEnv {
                    log_carefully(
                        logger,
                        LogLevel::Info,
                        &format!(
                            "The {} environment variable has been deprecated, please switch to {}",
                            DEPRECATED_API_KEY_ENV, PUSH_API_KEY_ENV
                        ),
                    );
                }
                (source, Some(resolved))
            }
            Err(e) => {
                log_carefully(logger, LogLevel::Error, &format!("Not loading: {}", e));
                (ConfigSource::Unresolved, None)
            }
        };

        Config {
            root_path: self.root_path,
            env: self.env,
            initial_config: self.initial_config,
            config_file,
            source,
            resolved,
        }
    }
}

fn resolve(
    config_file: &Path,
    env: &str,
    initial_config: &ConfigMap,
    env_source: &EnvSource,
) -> Result<(ConfigSource, ConfigMap)> {
    if config_file.exists() {
        let file_config = load_file_config(config_file, env, &env_source.template_context())?;
        return Ok((
            ConfigSource::File,
            merge_layers(&[&*DEFAULT_CONFIG, initial_config, &file_config]),
        ));
    }

    let credential = find_credential(env_source).ok_or_else(|| ConfigError::NoCredentialSource {
        path: config_file.to_path_buf(),
    })?;
    let source = if credential.deprecated {
        ConfigSource::DeprecatedApiKeyEnv
    } else {
        ConfigSource::PushApiKeyEnv
    };

    Ok((
        source,
        merge_layers(&[&*DEFAULT_CONFIG, initial_config, &credential.to_layer()]),
    ))
}
