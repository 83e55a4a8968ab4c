//! AppSignal agent configuration resolution.
//!
//! Produces the settings the monitoring agent runs with for one deployment
//! environment, from built-in defaults, caller-supplied initial config, and
//! either `config/appsignal.yml` or the `APPSIGNAL_PUSH_API_KEY` environment
//! variable.
//!
//! # Modules
//!
//! - [`config`] - Resolution, loading, normalization and merging
//! - [`error`] - Error types and result aliases
//! - [`logging`] - Logger collaborator and failure-proof logging
//!
//! # Example
//!
//! ```
//! use appsignal_config::config::Config;
//! use appsignal_config::logging::MemoryLogger;
//! use std::collections::HashMap;
//!
//! // No config file and no credential: nothing is loaded, one error is logged.
//! let temp = tempfile::TempDir::new().unwrap();
//! let logger = MemoryLogger::new();
//! let config = Config::builder(temp.path(), "production")
//!     .env_vars(HashMap::new())
//!     .logger(&logger)
//!     .build();
//!
//! assert!(!config.is_loaded());
//! assert!(!config.is_active());
//! assert_eq!(logger.errors().len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod logging;

pub use config::{Config, ConfigKey, ConfigMap, ConfigSource};
pub use error::{ConfigError, Result};
pub use logging::{Logger, MemoryLogger, TracingLogger};
