//! Request deserialization for the dispatch loop.
//!
//! A request line is an envelope `{command, message, from, callback}`. The
//! envelope is parsed first; `message` is only interpreted once the router
//! knows which command it belongs to, so unknown commands never fail on a
//! message they do not understand.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::errors::DispatchError;
use super::fields::IdField;
use super::payload::RawPayload;

/// Parsed request envelope.
#[derive(Debug, Deserialize)]
pub struct RequestEnvelope {
    /// Request kind, for example `sendToZigbee`.
    pub command: String,
    /// Command-specific body.
    #[serde(default)]
    pub message: Value,
    /// Caller identity, echoed verbatim.
    #[serde(default)]
    pub from: Value,
    /// Caller correlation token, echoed verbatim.
    #[serde(default)]
    pub callback: Value,
}

impl RequestEnvelope {
    /// Parses a JSONL line into an envelope.
    ///
    /// Trailing whitespace (including the newline delimiter) is trimmed
    /// before parsing.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::MalformedJsonl` if the line is empty or is
    /// not a JSON object with a string `command`.
    pub fn parse(line: &[u8]) -> Result<Self, DispatchError> {
        let trimmed = trim_trailing_whitespace(line);
        if trimmed.is_empty() {
            return Err(DispatchError::malformed("empty request line"));
        }

        serde_json::from_slice(trimmed).map_err(DispatchError::from_json_error)
    }

    /// Interprets `message` as the body of this command.
    ///
    /// An absent or `null` message reads as an empty object.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::InvalidMessage` when the body does not match.
    pub fn message_as<T: DeserializeOwned>(&self) -> Result<T, DispatchError> {
        let parsed = match &self.message {
            Value::Null => T::deserialize(&Value::Object(Map::new())),
            message => T::deserialize(message),
        };
        parsed.map_err(|source| DispatchError::invalid_message(self.command.as_str(), source))
    }
}

/// Body of a `sendToZigbee` request.
#[derive(Debug, Clone, Deserialize)]
pub struct SendToZigbee {
    /// Target identifier, optionally carrying the adapter namespace.
    pub id: String,
    /// Destination endpoint.
    #[serde(default)]
    pub ep: Option<IdField>,
    /// Cluster identifier.
    #[serde(default)]
    pub cid: Option<IdField>,
    /// `functional` or `foundation`.
    #[serde(rename = "cmdType", default)]
    pub cmd_type: Option<String>,
    /// Command identifier.
    #[serde(default)]
    pub cmd: Option<IdField>,
    /// One payload entry or a sequence of them.
    #[serde(rename = "zclData", default)]
    pub zcl_data: Option<RawPayload>,
    /// Opaque per-frame options.
    #[serde(default)]
    pub cfg: Option<Value>,
}

/// Body of a `getLibData` request.
#[derive(Debug, Clone, Deserialize)]
pub struct LibDataQuery {
    /// Which enumeration to return.
    pub key: String,
    /// Cluster context for per-cluster keys.
    #[serde(default)]
    pub cid: Option<IdField>,
}

/// Body of a `reset` request.
#[derive(Debug, Clone, Deserialize)]
pub struct ResetRequest {
    /// Reset mode forwarded to the coordinator.
    #[serde(default = "default_reset_mode")]
    pub mode: String,
}

fn default_reset_mode() -> String {
    "soft".to_owned()
}

/// Trims trailing ASCII whitespace from a byte slice.
fn trim_trailing_whitespace(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |pos| pos + 1);
    &bytes[..end]
}
