//! Request routing for command dispatch.
//!
//! The envelope's `command` selects the handler. Unknown commands are
//! ignored without a response, like unknown metadata keys.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use zigdev_config::Config;
use zigdev_zcl::Catalog;

use crate::coordinator::Coordinator;

use super::command::{CommandDispatcher, CommandResult};
use super::completion;
use super::errors::DispatchError;
use super::metadata::MetadataService;
use super::request::{LibDataQuery, RequestEnvelope, ResetRequest, SendToZigbee};

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Known request kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Coordinator reset.
    Reset,
    /// Frame dispatch.
    SendToZigbee,
    /// Metadata query.
    GetLibData,
}

impl RequestKind {
    /// Parses the envelope's `command`. Matching is exact.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "reset" => Some(Self::Reset),
            "sendToZigbee" => Some(Self::SendToZigbee),
            "getLibData" => Some(Self::GetLibData),
            _ => None,
        }
    }

    /// Returns the canonical string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::SendToZigbee => "sendToZigbee",
            Self::GetLibData => "getLibData",
        }
    }
}

/// Collaborators shared by every request.
#[derive(Clone)]
pub struct DispatchContext {
    catalog: Arc<dyn Catalog>,
    coordinator: Arc<dyn Coordinator>,
    namespace: String,
    publish_timeout: Option<Duration>,
}

impl DispatchContext {
    /// Builds a context from explicit parts.
    pub fn new(
        catalog: Arc<dyn Catalog>,
        coordinator: Arc<dyn Coordinator>,
        namespace: impl Into<String>,
        publish_timeout: Option<Duration>,
    ) -> Self {
        Self {
            catalog,
            coordinator,
            namespace: namespace.into(),
            publish_timeout,
        }
    }

    /// Builds a context using the namespace and deadline from `config`.
    pub fn from_config(
        config: &Config,
        catalog: Arc<dyn Catalog>,
        coordinator: Arc<dyn Coordinator>,
    ) -> Self {
        Self::new(
            catalog,
            coordinator,
            config.namespace(),
            config.publish_timeout(),
        )
    }
}

/// Routes envelopes to the metadata service, the command dispatcher or the
/// reset passthrough.
pub(crate) struct RequestRouter {
    metadata: MetadataService,
    commands: CommandDispatcher,
    coordinator: Arc<dyn Coordinator>,
    publish_timeout: Option<Duration>,
}

impl RequestRouter {
    pub(crate) fn new(context: DispatchContext) -> Self {
        let DispatchContext {
            catalog,
            coordinator,
            namespace,
            publish_timeout,
        } = context;
        Self {
            metadata: MetadataService::new(Arc::clone(&catalog)),
            commands: CommandDispatcher::new(
                catalog,
                Arc::clone(&coordinator),
                namespace,
                publish_timeout,
            ),
            coordinator,
            publish_timeout,
        }
    }

    /// Routes one envelope.
    ///
    /// Returns `Ok(None)` when no response should be sent.
    ///
    /// # Errors
    ///
    /// Returns the failure that the caller should see as the response error.
    pub(crate) fn route(&self, envelope: &RequestEnvelope) -> Result<Option<Value>, DispatchError> {
        let Some(kind) = RequestKind::parse(&envelope.command) else {
            debug!(
                target: DISPATCH_TARGET,
                command = %envelope.command,
                "ignoring unknown command"
            );
            return Ok(None);
        };

        debug!(
            target: DISPATCH_TARGET,
            command = kind.as_str(),
            "routing request"
        );

        match kind {
            RequestKind::Reset => {
                let request: ResetRequest = envelope.message_as()?;
                Ok(Some(serde_json::to_value(self.reset(&request))?))
            }
            RequestKind::SendToZigbee => {
                let request: SendToZigbee = envelope.message_as()?;
                let result = self.commands.dispatch(request)?;
                Ok(Some(serde_json::to_value(result)?))
            }
            RequestKind::GetLibData => {
                let query: LibDataQuery = envelope.message_as()?;
                let result = self.metadata.query(&query)?;
                Ok(result.map(serde_json::to_value).transpose()?)
            }
        }
    }

    fn reset(&self, request: &ResetRequest) -> CommandResult {
        let (completion, pending) = completion::channel();
        self.coordinator.reset(&request.mode, completion);
        pending
            .wait(self.publish_timeout)
            .map_or_else(|error| CommandResult::failure(&error), CommandResult::from)
    }
}
