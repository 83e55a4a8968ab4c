//! Configuration resolution for the monitoring agent.
//!
//! This module handles all aspects of configuration:
//! - Key normalization in [`key`]
//! - Built-in defaults in [`defaults`]
//! - Layered merging in [`merger`]
//! - Config file templates in [`interpolation`]
//! - Config file loading in [`loader`]
//! - Environment variable fallback in [`environment`]
//! - The resolver itself in [`resolver`]
//!
//! # Example
//!
//! ```
//! use appsignal_config::config::Config;
//! use appsignal_config::logging::MemoryLogger;
//! use std::collections::HashMap;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! fs::create_dir_all(temp.path().join("config")).unwrap();
//! fs::write(
//!     temp.path().join("config").join("appsignal.yml"),
//!     "production:\n  push_api_key: abc123\n  active: true\n",
//! )
//! .unwrap();
//!
//! let logger = MemoryLogger::new();
//! let config = Config::builder(temp.path(), "production")
//!     .env_vars(HashMap::new())
//!     .logger(&logger)
//!     .build();
//!
//! assert!(config.is_active());
//! assert_eq!(config.get("endpoint").unwrap(), "https://push.appsignal.com/1");
//! ```
//!
//! # Resolution Order
//!
//! The first source that applies is layered over the defaults:
//! 1. `config/appsignal.yml` section for the environment
//! 2. `APPSIGNAL_PUSH_API_KEY`
//! 3. `APPSIGNAL_API_KEY` (deprecated)
//!
//! Precedence inside the result: source > initial config > defaults.

pub mod defaults;
pub mod environment;
pub mod interpolation;
pub mod key;
pub mod loader;
pub mod merger;
pub mod resolver;

// Key re-exports
pub use key::{normalize_keys, ConfigKey, ConfigMap};

// Defaults re-exports
pub use defaults::DEFAULT_CONFIG;

// Merger re-exports
pub use merger::{merge_layer, merge_layers};

// Interpolation re-exports
pub use interpolation::{parse_template, render_template, Segment, TemplateContext};

// Loader re-exports
pub use loader::{
    apply_legacy_api_key, config_file_path, environment_section, load_document, load_file_config,
    parse_document,
};

// Environment re-exports
pub use environment::{
    find_credential, EnvCredential, EnvSource, DEPRECATED_API_KEY_ENV, PUSH_API_KEY_ENV,
};

// Resolver re-exports
pub use resolver::{Config, ConfigBuilder, ConfigSource};

/// Re-export of the value type settings are stored as.
pub use serde_yaml::Value;
