//! Seam between the dispatcher and the Zigbee stack.
//!
//! The coordinator owns the device registry and the radio. Dispatch only
//! needs to look targets up, hand over fully resolved frames and trigger
//! resets, so that is all the [`Coordinator`] trait exposes. Completions are
//! delivered through a one-shot [`Completion`] which the implementation may
//! fire from any thread.

mod detached;
mod frame;

use std::fmt;

use serde_json::Value;
use thiserror::Error;

pub(crate) use self::detached::DetachedCoordinator;
pub use self::frame::{CommandKind, PayloadEntry, PublishRequest};

/// A device known to the coordinator's registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    address: String,
    model: Option<String>,
}

impl Device {
    /// Creates a device record for the normalized `0x` address.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            model: None,
        }
    }

    /// Attaches the model identifier reported by the device.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Normalized device address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Model identifier, when the device has been interviewed.
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }
}

/// A multicast group known to the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group {
    id: u16,
}

impl Group {
    /// Creates a group handle.
    pub fn new(id: u16) -> Self {
        Self { id }
    }

    /// Numeric group identifier.
    pub fn id(&self) -> u16 {
        self.id
    }
}

/// Resolved destination of a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Unicast to a single device.
    Device(Device),
    /// Multicast to a group.
    Group(Group),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device(device) => write!(f, "device {}", device.address()),
            Self::Group(group) => write!(f, "group {}", group.id()),
        }
    }
}

/// Failures reported by the coordinator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PublishError {
    /// The frame was refused before anything was sent.
    #[error("{message}")]
    Rejected {
        /// Description supplied by the stack.
        message: String,
    },
    /// The frame was sent but delivery or the response failed.
    #[error("{message}")]
    Failed {
        /// Description supplied by the stack.
        message: String,
    },
    /// No radio is attached to the daemon.
    #[error("coordinator is not attached to a radio")]
    Detached,
}

impl PublishError {
    /// Creates a synchronous rejection.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Creates an asynchronous delivery failure.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

/// What the stack reports when a publish or reset finishes.
///
/// A failed exchange may still carry the response frame the device sent,
/// so the message and the error are independent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublishOutcome {
    /// Response payload from the device or the stack.
    pub message: Option<Value>,
    /// Failure, if the exchange did not succeed.
    pub error: Option<PublishError>,
}

impl PublishOutcome {
    /// Successful exchange carrying `message`.
    pub fn delivered(message: Option<Value>) -> Self {
        Self {
            message,
            error: None,
        }
    }

    /// Failed exchange without a response frame.
    pub fn failed(error: PublishError) -> Self {
        Self {
            message: None,
            error: Some(error),
        }
    }

    /// Attaches the response frame received alongside the outcome.
    #[must_use]
    pub fn with_message(mut self, message: Value) -> Self {
        self.message = Some(message);
        self
    }
}

/// One-shot callback fired when a publish or reset finishes.
///
/// Consuming `self` in [`Completion::complete`] means a completion can fire
/// at most once. Dropping it without completing is reported to the waiting
/// request as an error.
pub struct Completion {
    callback: Box<dyn FnOnce(PublishOutcome) + Send>,
}

impl Completion {
    /// Wraps a callback.
    pub fn new(callback: impl FnOnce(PublishOutcome) + Send + 'static) -> Self {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Delivers the outcome.
    pub fn complete(self, outcome: PublishOutcome) {
        (self.callback)(outcome);
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion").finish_non_exhaustive()
    }
}

/// Device registry and frame transmission.
pub trait Coordinator: Send + Sync {
    /// Looks a device up by its normalized `0x` address.
    fn device(&self, address: &str) -> Option<Device>;

    /// Looks a group up by identifier.
    fn group(&self, group_id: u16) -> Option<Group>;

    /// Sends a resolved frame.
    ///
    /// Returning `Err` means nothing was sent and `completion` will never
    /// fire. On `Ok` the completion fires exactly once.
    fn publish(&self, request: PublishRequest, completion: Completion)
    -> Result<(), PublishError>;

    /// Resets the coordinator. `mode` is forwarded untouched.
    fn reset(&self, mode: &str, completion: Completion);
}
