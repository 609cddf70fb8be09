//! Coordinator used when no radio backend is attached.

use tracing::warn;

use super::{
    Completion, Coordinator, Device, Group, PublishError, PublishOutcome, PublishRequest,
};

const COORDINATOR_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::coordinator::detached");

/// Coordinator with an empty registry.
///
/// Every target lookup misses, so dispatch requests fail with a
/// "not found" response before reaching [`Coordinator::publish`].
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DetachedCoordinator;

impl Coordinator for DetachedCoordinator {
    fn device(&self, _address: &str) -> Option<Device> {
        None
    }

    fn group(&self, _group_id: u16) -> Option<Group> {
        None
    }

    fn publish(
        &self,
        request: PublishRequest,
        _completion: Completion,
    ) -> Result<(), PublishError> {
        warn!(
            target: COORDINATOR_TARGET,
            target_id = %request.target,
            "publish requested without an attached radio"
        );
        Err(PublishError::Detached)
    }

    fn reset(&self, mode: &str, completion: Completion) {
        warn!(
            target: COORDINATOR_TARGET,
            mode,
            "reset requested without an attached radio"
        );
        completion.complete(PublishOutcome::failed(PublishError::Detached));
    }
}
