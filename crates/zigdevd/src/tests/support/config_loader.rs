//! Configuration loaders for bootstrap tests.

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use tempfile::TempDir;

use zigdev_config::{Config, SocketEndpoint};

use crate::bootstrap::ConfigLoader;

/// Loader that places a Unix socket under a temporary directory.
pub(crate) struct TestConfigLoader {
    socket_dir: TempDir,
}

impl TestConfigLoader {
    pub(crate) fn new() -> Self {
        let socket_dir = TempDir::new().expect("failed to create temporary socket directory");
        Self { socket_dir }
    }

    fn socket_path(&self) -> String {
        let path = self.socket_dir.path().join("nested").join("zigdevd.sock");
        path.to_str()
            .expect("temporary socket path was not valid UTF-8")
            .to_owned()
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(Config {
            daemon_socket: SocketEndpoint::unix(self.socket_path()),
            ..Config::default()
        })
    }
}

/// Loader that fails by passing an unsupported socket scheme.
pub(crate) struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("zigdevd"),
            OsString::from("--daemon-socket"),
            OsString::from("invalid://socket"),
        ];
        Config::load_from_iter(args)
    }
}

/// Configuration bound to an ephemeral loopback port.
pub(crate) fn tcp_config(namespace: &str, publish_timeout_ms: u64) -> Config {
    Config {
        daemon_socket: SocketEndpoint::tcp("127.0.0.1", 0),
        namespace: namespace.to_owned(),
        publish_timeout_ms,
        ..Config::default()
    }
}
