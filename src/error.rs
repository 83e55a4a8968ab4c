//! Error types for configuration resolution.
//!
//! This module defines [`ConfigError`], the error type used by the loading
//! and normalization steps, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Internal steps return `ConfigError` and propagate with `?`
//! - The resolver is the boundary: every error ends up as an unloaded
//!   [`Config`](crate::config::Config) plus one logged line, never a panic
//! - Messages are written to be read in an application log

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for configuration resolution.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// The config file has no entry for the requested environment.
    #[error("config for '{env}' not found")]
    EnvironmentNotConfigured { env: String },

    /// No config file and no credential in the environment.
    #[error(
        "No config file found at '{}' and no APPSIGNAL_PUSH_API_KEY env var present",
        path.display()
    )]
    NoCredentialSource { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The config file still contains ERB tags, which are not evaluated.
    #[error("Unsupported ERB tag {tag} in {path}; use ${{VAR}} templates instead")]
    UnsupportedTemplate { path: PathBuf, tag: String },

    /// The environment entry exists but is not a mapping of settings.
    #[error("config for '{env}' is not a mapping")]
    InvalidEnvironmentSection { env: String },

    /// A key that has no textual form (null, sequence or mapping).
    #[error("Invalid configuration key: {key}")]
    InvalidKey { key: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = ConfigError::ConfigNotFound {
            path: PathBuf::from("/app/config/appsignal.yml"),
        };
        assert!(err.to_string().contains("/app/config/appsignal.yml"));
    }

    #[test]
    fn environment_not_configured_names_env() {
        let err = ConfigError::EnvironmentNotConfigured {
            env: "staging".into(),
        };
        assert_eq!(err.to_string(), "config for 'staging' not found");
    }

    #[test]
    fn no_credential_source_names_path_and_variable() {
        let err = ConfigError::NoCredentialSource {
            path: PathBuf::from("/app/config/appsignal.yml"),
        };
        assert_eq!(
            err.to_string(),
            "No config file found at '/app/config/appsignal.yml' \
             and no APPSIGNAL_PUSH_API_KEY env var present"
        );
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = ConfigError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn unsupported_template_names_tag_and_replacement() {
        let err = ConfigError::UnsupportedTemplate {
            path: PathBuf::from("/app/config/appsignal.yml"),
            tag: "<%= ENV['KEY'] %>".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("<%= ENV['KEY'] %>"));
        assert!(msg.contains("/app/config/appsignal.yml"));
        assert!(msg.contains("${VAR}"));
    }

    #[test]
    fn invalid_key_displays_key() {
        let err = ConfigError::InvalidKey { key: "~".into() };
        assert!(err.to_string().contains('~'));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ConfigError = io_err.into();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
