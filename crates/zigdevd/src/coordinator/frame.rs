//! Fully resolved frame handed to the coordinator.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use zigdev_zcl::{AttributeId, ClusterId, CommandDef, DataTypeId};

use super::Target;

/// Which command namespace a frame uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    /// Cluster-specific command.
    Functional,
    /// Global ZCL command (read, write, report...).
    Foundation,
}

impl CommandKind {
    /// Parses the `cmdType` field. Matching is exact.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "functional" => Some(Self::Functional),
            "foundation" => Some(Self::Foundation),
            _ => None,
        }
    }

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Functional => "functional",
            Self::Foundation => "foundation",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized payload entry.
///
/// `attrId` and `dataType` are canonical integers once normalized; every
/// other field (`value`, command parameters) passes through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PayloadEntry {
    /// Attribute identifier.
    #[serde(rename = "attrId", skip_serializing_if = "Option::is_none")]
    pub attribute_id: Option<AttributeId>,
    /// Data-type tag.
    #[serde(rename = "dataType", skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataTypeId>,
    /// Remaining fields, in their original form.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Everything the coordinator needs to send one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishRequest {
    /// Destination device or group.
    pub target: Target,
    /// Cluster the command belongs to.
    pub cluster_id: ClusterId,
    /// Resolved command descriptor.
    pub command: CommandDef,
    /// Command namespace.
    pub kind: CommandKind,
    /// Normalized payload, in request order.
    pub payload: Vec<PayloadEntry>,
    /// Opaque per-frame options from the caller.
    pub config: Option<Value>,
    /// Destination endpoint; `None` lets the stack pick the default.
    pub endpoint: Option<u8>,
}
