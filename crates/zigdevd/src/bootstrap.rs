//! Daemon bootstrap orchestration.
//!
//! Bootstrap loads configuration, installs telemetry, prepares the socket
//! directory and assembles the dispatch context. Binding the socket is a
//! separate step ([`Daemon::serve`]) so callers can bootstrap without
//! accepting connections.

use std::net::SocketAddr;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;

use zigdev_config::{Config, EndpointError};
use zigdev_zcl::{BuiltinCatalog, Catalog};

use crate::coordinator::Coordinator;
use crate::dispatch::{DispatchConnectionHandler, DispatchContext};
use crate::health::HealthReporter;
use crate::telemetry::{self, TelemetryError, TelemetryHandle};
use crate::transport::{ListenerError, ListenerHandle, SocketListener};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the daemon configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader that returns a configuration resolved earlier.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps an already resolved configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// Socket preparation failed.
    #[error("failed to prepare daemon socket: {source}")]
    Socket {
        /// Error reported while preparing the socket directory.
        #[source]
        source: EndpointError,
    },
}

/// Bootstrapped daemon, ready to bind its socket.
pub struct Daemon {
    config: Config,
    context: DispatchContext,
    telemetry: TelemetryHandle,
    reporter: Arc<dyn HealthReporter>,
}

impl Daemon {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Binds the configured socket and starts serving requests.
    ///
    /// # Errors
    ///
    /// Returns a [`ListenerError`] when the socket cannot be bound.
    pub fn serve(self) -> Result<RunningDaemon, ListenerError> {
        let endpoint = self.config.daemon_socket().clone();
        let listener = SocketListener::bind(&endpoint)?;
        let local_addr = listener.local_addr();
        let handler = Arc::new(DispatchConnectionHandler::new(self.context));
        let listener = listener.start(handler)?;
        self.reporter.listener_ready(&endpoint);
        Ok(RunningDaemon {
            config: self.config,
            local_addr,
            listener,
            reporter: self.reporter,
        })
    }
}

/// Daemon whose listener is accepting connections.
pub struct RunningDaemon {
    config: Config,
    local_addr: Option<SocketAddr>,
    listener: ListenerHandle,
    reporter: Arc<dyn HealthReporter>,
}

impl RunningDaemon {
    /// Bound TCP address; `None` for Unix sockets.
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Stops accepting connections and waits for the listener to exit.
    ///
    /// Requests already being handled finish on their own threads.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::ThreadPanic`] if the accept loop panicked.
    pub fn stop(self) -> Result<(), ListenerError> {
        self.listener.shutdown();
        self.listener.join()?;
        self.reporter.listener_stopped(self.config.daemon_socket());
        Ok(())
    }
}

/// Bootstraps the daemon using the supplied collaborators.
///
/// The catalog is the built-in one; the coordinator is injected so the
/// daemon can run detached or against a test double.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
    coordinator: Arc<dyn Coordinator>,
) -> Result<Daemon, BootstrapError> {
    reporter.bootstrap_starting();

    let config = match loader.load() {
        Ok(config) => config,
        Err(source) => {
            let error = BootstrapError::Configuration { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let telemetry = match telemetry::initialise(&config) {
        Ok(handle) => handle,
        Err(source) => {
            let error = BootstrapError::Telemetry { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    if let Err(source) = config.daemon_socket().prepare_filesystem() {
        let error = BootstrapError::Socket { source };
        reporter.bootstrap_failed(&error);
        return Err(error);
    }

    let catalog: Arc<dyn Catalog> = Arc::new(BuiltinCatalog::new());
    let context = DispatchContext::from_config(&config, catalog, coordinator);
    reporter.bootstrap_succeeded(&config);

    Ok(Daemon {
        config,
        context,
        telemetry,
        reporter,
    })
}
