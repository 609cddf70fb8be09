//! Waiting on coordinator completions.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use tracing::debug;

use crate::coordinator::{Completion, PublishOutcome};

use super::errors::DispatchError;
use super::router::DISPATCH_TARGET;

/// Receiving half of a [`Completion`].
pub(crate) struct PendingOutcome {
    receiver: Receiver<PublishOutcome>,
}

/// Creates a completion and the handle that waits on it.
pub(crate) fn channel() -> (Completion, PendingOutcome) {
    let (sender, receiver) = mpsc::sync_channel(1);
    let completion = Completion::new(move |outcome| {
        if sender.send(outcome).is_err() {
            debug!(
                target: DISPATCH_TARGET,
                "completion arrived after the request stopped waiting"
            );
        }
    });
    (completion, PendingOutcome { receiver })
}

impl PendingOutcome {
    /// Blocks until the completion fires, or until `deadline` elapses.
    ///
    /// With no deadline this waits for as long as the coordinator holds the
    /// completion. The outcome is returned as reported, failures included;
    /// only a missing outcome is an error here.
    pub(crate) fn wait(self, deadline: Option<Duration>) -> Result<PublishOutcome, DispatchError> {
        match deadline {
            None => self
                .receiver
                .recv()
                .map_err(|_| DispatchError::CompletionDropped),
            Some(timeout) => self
                .receiver
                .recv_timeout(timeout)
                .map_err(|error| match error {
                    RecvTimeoutError::Timeout => DispatchError::timeout(timeout),
                    RecvTimeoutError::Disconnected => DispatchError::CompletionDropped,
                }),
        }
    }
}
