//! `sendToZigbee` handling.
//!
//! Each stage below is a hard gate; the coordinator is only contacted once
//! the target, the command descriptor and the payload are all resolved.
//!
//! 1. normalize the address,
//! 2. resolve the command descriptor (a miss is tolerated until stage 5),
//! 3. normalize the payload,
//! 4. resolve the device or group,
//! 5. require a cluster and a descriptor,
//! 6. publish and wait for the completion.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use zigdev_zcl::{Catalog, ClusterId, CommandDef, CommandId};

use crate::coordinator::{CommandKind, Coordinator, PublishOutcome, PublishRequest, Target};

use super::completion;
use super::errors::DispatchError;
use super::fields::{IdField, narrow};
use super::payload::{PayloadNormalizer, RawPayload};
use super::request::SendToZigbee;
use super::router::DISPATCH_TARGET;
use super::target::{normalize_address, resolve_target};

/// Result relayed to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommandResult {
    /// Message returned by the coordinator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
    /// Error text, when the request failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CommandResult {
    /// Failed result; only the error's text survives.
    pub fn failure(error: &DispatchError) -> Self {
        Self {
            message: None,
            error: Some(error.to_string()),
        }
    }
}

impl From<PublishOutcome> for CommandResult {
    fn from(outcome: PublishOutcome) -> Self {
        Self {
            message: outcome.message,
            error: outcome.error.map(|error| error.to_string()),
        }
    }
}

/// Resolves and publishes `sendToZigbee` requests.
pub(crate) struct CommandDispatcher {
    catalog: Arc<dyn Catalog>,
    coordinator: Arc<dyn Coordinator>,
    namespace: String,
    publish_timeout: Option<Duration>,
}

impl CommandDispatcher {
    pub(crate) fn new(
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

    /// Runs one request through every stage.
    pub(crate) fn dispatch(&self, request: SendToZigbee) -> Result<CommandResult, DispatchError> {
        let address = normalize_address(&self.namespace, &request.id);

        let kind = request
            .cmd_type
            .as_deref()
            .and_then(CommandKind::parse)
            .ok_or_else(|| {
                DispatchError::invalid_command_kind(request.cmd_type.clone().unwrap_or_default())
            })?;
        let cluster_id = tolerant_id::<ClusterId>(request.cid.as_ref());
        let command = self.resolve_command(kind, cluster_id, request.cmd.as_ref());

        let entries = request
            .zcl_data
            .map(RawPayload::into_entries)
            .unwrap_or_default();
        let payload = PayloadNormalizer::new(self.catalog.as_ref(), cluster_id).normalize(entries)?;

        let target = resolve_target(self.coordinator.as_ref(), &address)?;

        let (Some(cluster_id), Some(command)) = (cluster_id, command) else {
            return Err(DispatchError::IncompleteRequest);
        };
        let endpoint = endpoint(request.ep.as_ref())?;

        let publish = PublishRequest {
            target,
            cluster_id,
            command,
            kind,
            payload,
            config: request.cfg,
            endpoint,
        };
        self.publish(publish)
    }

    fn resolve_command(
        &self,
        kind: CommandKind,
        cluster_id: Option<ClusterId>,
        cmd: Option<&IdField>,
    ) -> Option<CommandDef> {
        let command_id = tolerant_id::<CommandId>(cmd)?;
        let command = match kind {
            CommandKind::Functional => self
                .catalog
                .cluster(cluster_id?)
                .and_then(|cluster| cluster.command(command_id)),
            CommandKind::Foundation => self.catalog.global_command(command_id),
        };
        command.cloned()
    }

    fn publish(&self, request: PublishRequest) -> Result<CommandResult, DispatchError> {
        let model = match &request.target {
            Target::Device(device) => device.model(),
            Target::Group(_) => None,
        };
        debug!(
            target: DISPATCH_TARGET,
            destination = %request.target,
            model = model.unwrap_or("unknown"),
            cluster_id = request.cluster_id,
            command = request.command.name(),
            kind = %request.kind,
            endpoint = ?request.endpoint,
            payload = ?request.payload,
            "publishing frame"
        );

        let destination = request.target.to_string();
        let (completion, pending) = completion::channel();
        if let Err(rejection) = self.coordinator.publish(request, completion) {
            error!(
                target: DISPATCH_TARGET,
                destination = %destination,
                error = %rejection,
                "coordinator rejected frame"
            );
            return Err(rejection.into());
        }

        let outcome = pending.wait(self.publish_timeout).inspect_err(|failure| {
            warn!(
                target: DISPATCH_TARGET,
                destination = %destination,
                error = %failure,
                "publish failed"
            );
        })?;
        if let Some(failure) = &outcome.error {
            warn!(
                target: DISPATCH_TARGET,
                destination = %destination,
                error = %failure,
                with_message = outcome.message.is_some(),
                "publish failed"
            );
        }
        Ok(outcome.into())
    }
}

/// Reads an identifier that may silently fail to resolve.
fn tolerant_id<T: TryFrom<u64>>(field: Option<&IdField>) -> Option<T> {
    field
        .and_then(IdField::as_integer)
        .and_then(|value| T::try_from(value).ok())
}

/// Endpoint `0` and an absent endpoint both mean "stack default".
fn endpoint(field: Option<&IdField>) -> Result<Option<u8>, DispatchError> {
    let Some(field) = field else {
        return Ok(None);
    };
    let value = field
        .as_integer()
        .ok_or_else(|| DispatchError::invalid_field("ep", field))?;
    match narrow::<u8>("ep", value)? {
        0 => Ok(None),
        endpoint => Ok(Some(endpoint)),
    }
}
