use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use ortho_config::OrthoConfig;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

use zigdev_config::{
    Config, SocketEndpoint, default_log_filter, default_log_format, default_namespace,
    default_socket_endpoint,
};

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

struct Harness {
    temp_dir: TempDir,
    file_lines: RefCell<Vec<String>>,
    cli_args: RefCell<Vec<OsString>>,
    env_overrides: RefCell<Vec<(String, Option<OsString>)>>,
    loaded: RefCell<Option<Config>>,
    error: RefCell<Option<String>>,
    _env_guard: MutexGuard<'static, ()>,
}

impl Harness {
    fn new() -> Self {
        let env_guard = ENV_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let temp_dir = match TempDir::new() {
            Ok(dir) => dir,
            Err(error) => panic!("failed to create temporary directory: {error}"),
        };
        Self {
            temp_dir,
            file_lines: RefCell::new(Vec::new()),
            cli_args: RefCell::new(vec![OsString::from("zigdevd")]),
            env_overrides: RefCell::new(Vec::new()),
            loaded: RefCell::new(None),
            error: RefCell::new(None),
            _env_guard: env_guard,
        }
    }

    fn add_file_line(&self, line: String) {
        let first = self.file_lines.borrow().is_empty();
        self.file_lines.borrow_mut().push(line);
        let path = self.temp_dir.path().join("zigdev.toml");
        if let Err(error) = fs::write(&path, self.file_lines.borrow().join("\n")) {
            panic!("failed to write configuration: {error}");
        }
        if first {
            let mut args = self.cli_args.borrow_mut();
            args.push(OsString::from("--config-path"));
            args.push(path.into_os_string());
        }
    }

    fn set_env(&self, key: &str, value: &str) {
        let previous = std::env::var_os(key);
        // Environment mutation is serialised by `ENV_MUTEX` and undone in
        // `Drop`.
        unsafe { std::env::set_var(key, value) };
        self.env_overrides
            .borrow_mut()
            .push((key.to_string(), previous));
    }

    fn push_cli_arg(&self, arg: impl Into<OsString>) {
        self.cli_args.borrow_mut().push(arg.into());
    }

    fn load(&self) {
        if self.loaded.borrow().is_some() || self.error.borrow().is_some() {
            return;
        }

        let args = self.cli_args.borrow().clone();
        match Config::load_from_iter(args) {
            Ok(config) => *self.loaded.borrow_mut() = Some(config),
            Err(error) => *self.error.borrow_mut() = Some(error.to_string()),
        }
    }

    fn loaded_config(&self) -> Config {
        self.load();
        if let Some(error) = self.error.borrow().as_ref() {
            panic!("configuration failed to load: {error}");
        }
        match self.loaded.borrow().as_ref() {
            Some(config) => config.clone(),
            None => panic!("configuration was not loaded"),
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let mut overrides = self.env_overrides.borrow_mut();
        while let Some((key, value)) = overrides.pop() {
            match value {
                Some(os_value) => unsafe { std::env::set_var(&key, os_value) },
                None => unsafe { std::env::remove_var(&key) },
            }
        }
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[given("a configuration file setting the namespace to \"{namespace}\"")]
fn given_file_namespace(harness: &Harness, namespace: String) {
    harness.add_file_line(format!("namespace = \"{namespace}\""));
}

#[given("a configuration file setting the daemon socket to \"{socket}\"")]
fn given_file_socket(harness: &Harness, socket: String) {
    let line = match socket.parse::<SocketEndpoint>() {
        Ok(SocketEndpoint::Tcp { host, port }) => {
            format!("daemon_socket = {{ transport = \"tcp\", host = \"{host}\", port = {port} }}")
        }
        Ok(SocketEndpoint::Unix { path }) => {
            format!("daemon_socket = {{ transport = \"unix\", path = \"{path}\" }}")
        }
        Err(error) => panic!("invalid socket '{socket}': {error}"),
    };
    harness.add_file_line(line);
}

#[given("the environment overrides the namespace to \"{namespace}\"")]
fn given_env_namespace(harness: &Harness, namespace: String) {
    harness.set_env("ZIGDEV_NAMESPACE", &namespace);
}

#[given("the environment sets the daemon socket to \"{socket}\"")]
fn given_env_socket(harness: &Harness, socket: String) {
    harness.set_env("ZIGDEV_DAEMON_SOCKET", &socket);
}

#[when("the CLI sets the daemon socket to \"{socket}\"")]
fn when_cli_socket(harness: &Harness, socket: String) {
    harness.push_cli_arg("--daemon-socket");
    harness.push_cli_arg(socket);
}

#[when("the CLI sets the namespace to \"{namespace}\"")]
fn when_cli_namespace(harness: &Harness, namespace: String) {
    harness.push_cli_arg("--namespace");
    harness.push_cli_arg(namespace);
}

#[when("the configuration loads without overrides")]
fn when_load_without_overrides(harness: &Harness) {
    harness.load();
}

#[then("loading the configuration resolves the namespace to \"{namespace}\"")]
fn then_namespace(harness: &Harness, namespace: String) {
    assert_eq!(harness.loaded_config().namespace(), namespace);
}

#[then("loading the configuration resolves the daemon socket to \"{socket}\"")]
fn then_socket(harness: &Harness, socket: String) {
    let expected = match socket.parse::<SocketEndpoint>() {
        Ok(endpoint) => endpoint,
        Err(error) => panic!("invalid expected socket '{socket}': {error}"),
    };
    assert_eq!(harness.loaded_config().daemon_socket(), &expected);
}

#[then("loading the configuration applies the built-in defaults")]
fn then_defaults_applied(harness: &Harness) {
    let config = harness.loaded_config();
    assert_eq!(config.daemon_socket(), &default_socket_endpoint());
    assert_eq!(config.log_filter(), default_log_filter());
    assert_eq!(config.log_format(), default_log_format());
    assert_eq!(config.namespace(), default_namespace());
    assert_eq!(config.publish_timeout(), None);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Built-in defaults apply without overrides"
)]
fn defaults_apply(harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Environment overrides the configuration file"
)]
fn environment_beats_file(harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "CLI flags override the environment"
)]
fn cli_beats_environment(harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Configuration file sets the daemon socket"
)]
fn file_sets_socket(harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Environment sets the daemon socket as a URL"
)]
fn environment_sets_socket_url(harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "CLI flag sets the daemon socket to a bare path"
)]
fn cli_sets_socket_path(harness: Harness) {
    drop(harness);
}
