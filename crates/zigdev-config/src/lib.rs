//! Shared configuration for the zigdev dispatch daemon.
//!
//! Values are layered by [`ortho_config`]: built-in defaults, then an
//! optional TOML file (`--config-path` or `ZIGDEV_CONFIG_PATH`), then
//! `ZIGDEV_*` environment variables, then command-line flags such as
//! `--daemon-socket tcp://127.0.0.1:9780` or `--namespace zigbee.1`.

mod defaults;
mod logging;
mod socket;

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_NAMESPACE, DEFAULT_TCP_PORT, default_log_filter,
    default_log_filter_string, default_log_format, default_namespace,
    default_publish_timeout_ms, default_socket_endpoint,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use socket::{EndpointError, SocketEndpoint};

/// Resolved daemon configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ZIGDEV")]
pub struct Config {
    /// Socket the daemon accepts requests on.
    #[serde(default = "defaults::default_socket_endpoint")]
    pub daemon_socket: SocketEndpoint,
    /// `tracing` filter expression.
    #[serde(default = "defaults::default_log_filter_string")]
    pub log_filter: String,
    /// Output format for log events.
    #[serde(default = "defaults::default_log_format")]
    pub log_format: LogFormat,
    /// Adapter namespace stripped from target identifiers.
    #[serde(default = "defaults::default_namespace")]
    pub namespace: String,
    /// Deadline for publish completions in milliseconds; `0` disables it.
    #[serde(default = "defaults::default_publish_timeout_ms")]
    pub publish_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            daemon_socket: default_socket_endpoint(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            namespace: default_namespace(),
            publish_timeout_ms: default_publish_timeout_ms(),
        }
    }
}

impl Config {
    /// Socket endpoint the daemon binds.
    #[must_use]
    pub fn daemon_socket(&self) -> &SocketEndpoint {
        &self.daemon_socket
    }

    /// Log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Log output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Adapter namespace, without the trailing separator.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.namespace.trim_end_matches('.')
    }

    /// Publish deadline, or `None` to wait for completions indefinitely.
    #[must_use]
    pub fn publish_timeout(&self) -> Option<Duration> {
        match self.publish_timeout_ms {
            0 => None,
            millis => Some(Duration::from_millis(millis)),
        }
    }
}
