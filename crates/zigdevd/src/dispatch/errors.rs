//! Error types for request dispatch failures.
//!
//! Every variant ends up as the `error` string of a response; the
//! [`Display`](std::fmt::Display) text is the only part callers ever see.

use std::io;
use std::time::Duration;

use thiserror::Error;

use zigdev_zcl::{CatalogError, ClusterId};

use crate::coordinator::PublishError;

/// Errors surfaced during request parsing and dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Request line could not be parsed as a request envelope.
    #[error("malformed JSONL: {message}")]
    MalformedJsonl {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The envelope's `message` does not fit the command's schema.
    #[error("invalid {command} message: {source}")]
    InvalidMessage {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    /// A numeric field is negative, fractional or out of range.
    #[error("invalid value {value} for field '{field}'")]
    InvalidField { field: &'static str, value: String },

    /// A field required by the query is absent.
    #[error("missing field '{field}'")]
    MissingField { field: &'static str },

    /// `cmdType` is neither `functional` nor `foundation`.
    #[error("Invalid cmdType '{kind}'")]
    InvalidCommandKind { kind: String },

    /// The address matches no device and no group.
    #[error("Device or group {address} not found!")]
    TargetNotFound { address: String },

    /// Cluster or command descriptor could not be resolved.
    #[error("Incomplete data (cid or cmd)")]
    IncompleteRequest,

    /// The catalog has no cluster with this identifier.
    #[error("cluster {cluster_id} not found")]
    ClusterNotFound { cluster_id: ClusterId },

    /// An attribute name did not resolve.
    #[error("unresolved attribute '{name}'{}", cluster_suffix(.cluster_id))]
    UnresolvedAttribute {
        cluster_id: Option<ClusterId>,
        name: String,
    },

    /// A data-type name did not resolve.
    #[error("unresolved data type '{name}'{}", cluster_suffix(.cluster_id))]
    UnresolvedDataType {
        cluster_id: Option<ClusterId>,
        name: String,
    },

    /// The coordinator refused the frame before sending it.
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// The completion did not fire before the configured deadline.
    #[error("publish timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u128 },

    /// The coordinator dropped the completion without firing it.
    #[error("completion dropped before the coordinator answered")]
    CompletionDropped,

    /// Request exceeds the maximum allowed size.
    #[error("request too large: {size} bytes exceeds {max_size} byte limit")]
    RequestTooLarge { size: usize, max_size: usize },

    /// IO error during read or write.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Response serialization failed.
    #[error("failed to serialize response: {0}")]
    SerializeResponse(#[from] serde_json::Error),
}

impl DispatchError {
    /// Creates a malformed JSONL error from a serde error.
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedJsonl {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates a malformed JSONL error with a custom message.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedJsonl {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an invalid message error for `command`.
    pub fn invalid_message(command: impl Into<String>, source: serde_json::Error) -> Self {
        Self::InvalidMessage {
            command: command.into(),
            source,
        }
    }

    /// Creates an invalid field error.
    pub fn invalid_field(field: &'static str, value: impl ToString) -> Self {
        Self::InvalidField {
            field,
            value: value.to_string(),
        }
    }

    /// Creates an invalid command kind error.
    pub fn invalid_command_kind(kind: impl Into<String>) -> Self {
        Self::InvalidCommandKind { kind: kind.into() }
    }

    /// Creates a target not found error.
    pub fn target_not_found(address: impl Into<String>) -> Self {
        Self::TargetNotFound {
            address: address.into(),
        }
    }

    /// Creates a timeout error for the elapsed deadline.
    pub fn timeout(deadline: Duration) -> Self {
        Self::Timeout {
            timeout_ms: deadline.as_millis(),
        }
    }

    /// Creates a request too large error.
    pub fn request_too_large(size: usize, max_size: usize) -> Self {
        Self::RequestTooLarge { size, max_size }
    }
}

impl From<CatalogError> for DispatchError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::ClusterNotFound { cluster_id } => Self::ClusterNotFound { cluster_id },
            CatalogError::UnknownAttribute { cluster_id, name } => Self::UnresolvedAttribute {
                cluster_id: Some(cluster_id),
                name,
            },
            CatalogError::UnknownDataType { cluster_id, name } => Self::UnresolvedDataType {
                cluster_id: Some(cluster_id),
                name,
            },
        }
    }
}

fn cluster_suffix(cluster_id: &Option<ClusterId>) -> String {
    cluster_id.map_or_else(
        || " without a cluster".to_owned(),
        |id| format!(" in cluster {id}"),
    )
}
