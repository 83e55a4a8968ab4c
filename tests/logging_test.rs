//! Integration tests for the default tracing logger.

use appsignal_config::config::{Config, DEPRECATED_API_KEY_ENV};
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Clone, Default)]
struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

impl CapturedOutput {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn with_captured_tracing<T>(filter: &str, f: impl FnOnce() -> T) -> (T, String) {
    let output = CapturedOutput::default();
    let writer = output.clone();
    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(move || writer.clone()),
        )
        .with(EnvFilter::new(filter));

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, output.contents())
}

#[test]
fn default_logger_reports_failure_through_tracing() {
    let temp = TempDir::new().unwrap();

    let (config, output) = with_captured_tracing("appsignal_config=info", || {
        Config::builder(temp.path(), "production")
            .env_vars(HashMap::new())
            .build()
    });

    assert!(!config.is_loaded());
    assert!(output.contains("ERROR"));
    assert!(output.contains("Not loading: No config file found at"));
}

#[test]
fn default_logger_reports_deprecation_at_info() {
    let temp = TempDir::new().unwrap();
    let mut env = HashMap::new();
    env.insert(DEPRECATED_API_KEY_ENV.to_string(), "xyz".to_string());

    let (config, output) = with_captured_tracing("appsignal_config=info", || {
        Config::builder(temp.path(), "production")
            .env_vars(env)
            .build()
    });

    assert!(config.is_loaded());
    assert!(output.contains("INFO"));
    assert!(output.contains("has been deprecated"));
    assert!(!output.contains("ERROR"));
}

#[test]
fn successful_resolution_is_silent_even_at_debug() {
    let temp = TempDir::new().unwrap();
    let mut env = HashMap::new();
    env.insert("APPSIGNAL_PUSH_API_KEY".to_string(), "abc".to_string());

    let (config, output) = with_captured_tracing("appsignal_config=trace", || {
        Config::builder(temp.path(), "production")
            .env_vars(env)
            .build()
    });

    assert!(config.is_active());
    assert!(output.is_empty(), "unexpected output: {output}");
}

#[test]
fn failed_resolution_writes_one_line_even_at_debug() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("config")).unwrap();
    std::fs::write(
        temp.path().join("config").join("appsignal.yml"),
        "production:\n  api_key: legacy\n",
    )
    .unwrap();

    let (config, output) = with_captured_tracing("appsignal_config=trace", || {
        Config::builder(temp.path(), "staging")
            .env_vars(HashMap::new())
            .build()
    });

    assert!(!config.is_loaded());
    assert_eq!(output.lines().count(), 1, "output: {output}");
    assert!(output.contains("config for 'staging' not found"));
}

#[test]
fn process_environment_is_the_default_source() {
    let temp = TempDir::new().unwrap();
    let expect_loaded = std::env::var_os("APPSIGNAL_PUSH_API_KEY").is_some()
        || std::env::var_os(DEPRECATED_API_KEY_ENV).is_some();

    let config = Config::new(temp.path(), "production");

    assert_eq!(config.is_loaded(), expect_loaded);
}
