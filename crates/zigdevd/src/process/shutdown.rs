use std::io;

use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
use signal_hook::iterator::Signals;
use thiserror::Error;
use tracing::info;

use super::PROCESS_TARGET;

const TERMINATION_SIGNALS: [(i32, &str); 4] = [
    (SIGTERM, "SIGTERM"),
    (SIGINT, "SIGINT"),
    (SIGQUIT, "SIGQUIT"),
    (SIGHUP, "SIGHUP"),
];

/// Blocks the foreground thread until the daemon should stop.
pub trait ShutdownSignal: Send + Sync {
    /// Returns once shutdown should begin.
    fn wait(&self) -> Result<(), ShutdownError>;
}

/// Failure to observe termination signals.
#[derive(Debug, Error)]
pub enum ShutdownError {
    /// Registering the signal handlers failed.
    #[error("failed to register termination signal handlers: {source}")]
    Register {
        /// Error returned by the registration.
        #[source]
        source: io::Error,
    },
}

/// Waits for the first termination signal delivered to the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShutdownSignal;

impl ShutdownSignal for SystemShutdownSignal {
    fn wait(&self) -> Result<(), ShutdownError> {
        let mut signals = Signals::new(TERMINATION_SIGNALS.map(|(signal, _)| signal))
            .map_err(|source| ShutdownError::Register { source })?;
        let received = signals.forever().next();
        let name = TERMINATION_SIGNALS
            .iter()
            .find(|(signal, _)| Some(*signal) == received)
            .map_or("unknown", |(_, name)| *name);
        info!(target: PROCESS_TARGET, signal = name, "stopping on termination signal");
        Ok(())
    }
}
