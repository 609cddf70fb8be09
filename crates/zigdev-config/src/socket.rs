//! Listener endpoints for the dispatch daemon.
//!
//! An endpoint is written as a URL everywhere a human types it:
//! `unix:///run/zigdev/zigdevd.sock`, `tcp://127.0.0.1:9780`, or simply an
//! absolute socket path. Configuration files may also spell it as a table
//! tagged by `transport`.

use std::fmt;
use std::fs::DirBuilder;
use std::io;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::defaults::DEFAULT_TCP_PORT;

/// Socket the daemon listens on for JSONL requests.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(try_from = "EndpointRepr", into = "String")]
pub enum SocketEndpoint {
    /// Unix domain socket at the given path.
    Unix { path: Utf8PathBuf },
    /// TCP socket bound to `host:port`.
    Tcp { host: String, port: u16 },
}

/// Failures turning text into an endpoint or preparing its directory.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// Text was neither an absolute path nor a URL.
    #[error("'{input}' is not a socket URL: {source}")]
    Malformed {
        input: String,
        #[source]
        source: url::ParseError,
    },
    /// Scheme was neither `unix` nor `tcp`.
    #[error("unsupported socket scheme '{scheme}' (expected unix or tcp)")]
    Scheme { scheme: String },
    /// A required part of the endpoint is absent.
    #[error("'{input}' names no {missing}")]
    Incomplete {
        input: String,
        missing: &'static str,
    },
    /// The socket directory could not be created.
    #[error("cannot create socket directory '{directory}': {source}")]
    Directory {
        directory: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}

impl EndpointError {
    fn incomplete(input: impl fmt::Display, missing: &'static str) -> Self {
        Self::Incomplete {
            input: input.to_string(),
            missing,
        }
    }
}

impl SocketEndpoint {
    /// Builds a Unix domain socket endpoint.
    #[must_use]
    pub fn unix(path: impl Into<Utf8PathBuf>) -> Self {
        Self::Unix { path: path.into() }
    }

    /// Builds a TCP socket endpoint.
    #[must_use]
    pub fn tcp(host: impl Into<String>, port: u16) -> Self {
        Self::Tcp {
            host: host.into(),
            port,
        }
    }

    /// Socket path for Unix endpoints.
    #[must_use]
    pub fn unix_path(&self) -> Option<&Utf8Path> {
        match self {
            Self::Unix { path } => Some(path.as_path()),
            Self::Tcp { .. } => None,
        }
    }

    /// Makes sure the directory holding a Unix socket exists.
    ///
    /// Missing directories are created owner-only; existing ones are left
    /// as they are. A bare file name lives in the working directory and
    /// needs nothing.
    pub fn prepare_filesystem(&self) -> Result<(), EndpointError> {
        let Some(path) = self.unix_path() else {
            return Ok(());
        };
        match path.parent() {
            None => Err(EndpointError::incomplete(path, "socket file name")),
            Some(directory) if directory.as_str().is_empty() => Ok(()),
            Some(directory) => create_private_dir(directory),
        }
    }

    fn from_url(input: &str, url: &Url) -> Result<Self, EndpointError> {
        match url.scheme() {
            "unix" if url.path().is_empty() => Err(EndpointError::incomplete(input, "socket path")),
            "unix" => Ok(Self::unix(url.path())),
            "tcp" => {
                let host = url
                    .host_str()
                    .filter(|host| !host.is_empty())
                    .ok_or_else(|| EndpointError::incomplete(input, "TCP host"))?;
                Ok(Self::tcp(host, url.port().unwrap_or(DEFAULT_TCP_PORT)))
            }
            scheme => Err(EndpointError::Scheme {
                scheme: scheme.to_owned(),
            }),
        }
    }
}

fn create_private_dir(directory: &Utf8Path) -> Result<(), EndpointError> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    std::os::unix::fs::DirBuilderExt::mode(&mut builder, 0o700);
    builder
        .create(directory)
        .or_else(|source| match source.kind() {
            io::ErrorKind::AlreadyExists => Ok(()),
            _ => Err(source),
        })
        .map_err(|source| EndpointError::Directory {
            directory: directory.to_path_buf(),
            source,
        })
}

impl fmt::Display for SocketEndpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix { path } => write!(formatter, "unix://{path}"),
            Self::Tcp { host, port } => write!(formatter, "tcp://{host}:{port}"),
        }
    }
}

impl FromStr for SocketEndpoint {
    type Err = EndpointError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.starts_with('/') {
            return Ok(Self::unix(input));
        }
        let url = Url::parse(input).map_err(|source| EndpointError::Malformed {
            input: input.to_owned(),
            source,
        })?;
        Self::from_url(input, &url)
    }
}

impl From<SocketEndpoint> for String {
    fn from(endpoint: SocketEndpoint) -> Self {
        endpoint.to_string()
    }
}

/// Accepted serialized spellings of an endpoint.
#[derive(Deserialize)]
#[serde(untagged)]
enum EndpointRepr {
    Text(String),
    Table(EndpointTable),
}

#[derive(Deserialize)]
#[serde(tag = "transport", rename_all = "snake_case")]
enum EndpointTable {
    Unix { path: Utf8PathBuf },
    Tcp { host: String, port: u16 },
}

impl TryFrom<EndpointRepr> for SocketEndpoint {
    type Error = EndpointError;

    fn try_from(repr: EndpointRepr) -> Result<Self, Self::Error> {
        match repr {
            EndpointRepr::Text(text) => text.parse(),
            EndpointRepr::Table(EndpointTable::Unix { path }) => Ok(Self::Unix { path }),
            EndpointRepr::Table(EndpointTable::Tcp { host, port }) => Ok(Self::Tcp { host, port }),
        }
    }
}
