//! Failures binding or running the daemon listener.

use std::fmt;
use std::io;

use thiserror::Error;

use zigdev_config::SocketEndpoint;

/// Listener setup step that hit an I/O error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerStep {
    /// Resolving the TCP host name.
    Resolve,
    /// Checking what occupies a Unix socket path.
    Inspect,
    /// Removing a stale Unix socket file.
    ClearStale,
    /// Binding the socket.
    Bind,
    /// Switching the socket to non-blocking accepts.
    Configure,
}

impl fmt::Display for ListenerStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Resolve => "resolve",
            Self::Inspect => "inspect",
            Self::ClearStale => "clear stale socket",
            Self::Bind => "bind",
            Self::Configure => "configure",
        })
    }
}

/// Errors surfaced while binding or running the socket listener.
///
/// `endpoint` is always the configured endpoint in URL form, so operators
/// see the value they wrote.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// An I/O call failed while setting the listener up.
    #[error("cannot {step} {endpoint}: {source}")]
    Io {
        step: ListenerStep,
        endpoint: String,
        #[source]
        source: io::Error,
    },
    /// The TCP host resolved to no addresses.
    #[error("{endpoint} resolved to no addresses")]
    Unresolved { endpoint: String },
    /// Another process answers on the socket path.
    #[error("{endpoint} is already served by another process")]
    InUse { endpoint: String },
    /// Something other than a socket occupies the path.
    #[error("{endpoint} is occupied by a file that is not a socket")]
    NotASocket { endpoint: String },
    /// Unix sockets were requested on a platform without them.
    #[cfg(not(unix))]
    #[error("{endpoint} needs Unix domain sockets, which this platform lacks")]
    UnixUnavailable { endpoint: String },
    /// The accept loop panicked.
    #[error("listener thread panicked")]
    ThreadPanic,
}

impl ListenerError {
    /// Adapter for `map_err` that tags an I/O error with its step.
    pub(crate) fn io(
        step: ListenerStep,
        endpoint: &SocketEndpoint,
    ) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Io {
            step,
            endpoint: endpoint.to_string(),
            source,
        }
    }

    /// Setup step that failed, for I/O errors.
    #[must_use]
    pub fn step(&self) -> Option<ListenerStep> {
        match self {
            Self::Io { step, .. } => Some(*step),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn io_errors_name_the_step_and_endpoint() {
        let endpoint = SocketEndpoint::tcp("127.0.0.1", 9780);
        let error = ListenerError::io(ListenerStep::Bind, &endpoint)(io::Error::new(
            io::ErrorKind::AddrInUse,
            "address in use",
        ));

        assert_eq!(error.step(), Some(ListenerStep::Bind));
        assert_eq!(
            error.to_string(),
            "cannot bind tcp://127.0.0.1:9780: address in use"
        );
    }

    #[rstest]
    fn occupied_paths_are_reported_as_urls() {
        let error = ListenerError::NotASocket {
            endpoint: SocketEndpoint::unix("/run/zigdev/zigdevd.sock").to_string(),
        };

        assert_eq!(error.step(), None);
        assert_eq!(
            error.to_string(),
            "unix:///run/zigdev/zigdevd.sock is occupied by a file that is not a socket"
        );
    }
}
