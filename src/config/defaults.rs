//! Built-in configuration defaults and recognized keys.

use super::key::{ConfigKey, ConfigMap};
use serde_yaml::Value;
use std::sync::LazyLock;

/// Credential used to push data to the collection service.
pub const PUSH_API_KEY: &str = "push_api_key";
/// Legacy name of [`PUSH_API_KEY`] written by older config generators.
pub const API_KEY: &str = "api_key";
/// Whether the agent is enabled.
pub const ACTIVE: &str = "active";
pub const IGNORE_EXCEPTIONS: &str = "ignore_exceptions";
pub const IGNORE_ACTIONS: &str = "ignore_actions";
pub const SEND_PARAMS: &str = "send_params";
pub const ENDPOINT: &str = "endpoint";
/// Request duration in milliseconds above which a request counts as slow.
pub const SLOW_REQUEST_THRESHOLD: &str = "slow_request_threshold";
pub const INSTRUMENT_NET_HTTP: &str = "instrument_net_http";

pub const DEFAULT_ENDPOINT: &str = "https://push.appsignal.com/1";
pub const DEFAULT_SLOW_REQUEST_THRESHOLD: u64 = 200;

/// Baseline settings every resolved configuration starts from.
pub static DEFAULT_CONFIG: LazyLock<ConfigMap> = LazyLock::new(|| {
    [
        (IGNORE_EXCEPTIONS, Value::Sequence(Vec::new())),
        (IGNORE_ACTIONS, Value::Sequence(Vec::new())),
        (SEND_PARAMS, Value::Bool(true)),
        (ENDPOINT, Value::from(DEFAULT_ENDPOINT)),
        (
            SLOW_REQUEST_THRESHOLD,
            Value::from(DEFAULT_SLOW_REQUEST_THRESHOLD),
        ),
        (INSTRUMENT_NET_HTTP, Value::Bool(true)),
    ]
    .into_iter()
    .map(|(key, value)| (ConfigKey::new(key), value))
    .collect()
});
