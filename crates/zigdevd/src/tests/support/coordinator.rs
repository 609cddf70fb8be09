//! Coordinator doubles.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use mockall::mock;
use serde_json::Value;

use crate::coordinator::{
    Completion, Coordinator, Device, Group, PublishError, PublishOutcome, PublishRequest,
};

mock! {
    pub Coordinator {}

    impl Coordinator for Coordinator {
        fn device(&self, address: &str) -> Option<Device>;
        fn group(&self, group_id: u16) -> Option<Group>;
        fn publish(
            &self,
            request: PublishRequest,
            completion: Completion,
        ) -> Result<(), PublishError>;
        fn reset(&self, mode: &str, completion: Completion);
    }
}

/// How [`RecordingCoordinator`] answers publishes and resets.
#[derive(Debug, Clone)]
pub(crate) enum PublishBehaviour {
    /// Completes successfully with the given message.
    Respond(Option<Value>),
    /// Refuses synchronously.
    Reject(String),
    /// Accepts, then completes with a failure.
    Fail(String),
    /// Accepts, then completes with a failure and the device's response.
    FailWithMessage(String, Value),
    /// Accepts and never completes while the coordinator lives.
    Hold,
}

/// Coordinator fake with a fixed registry that records what it was asked
/// to do.
pub(crate) struct RecordingCoordinator {
    devices: HashMap<String, Device>,
    groups: HashSet<u16>,
    behaviour: PublishBehaviour,
    published: Mutex<Vec<PublishRequest>>,
    resets: Mutex<Vec<String>>,
    held: Mutex<Vec<Completion>>,
}

impl RecordingCoordinator {
    pub(crate) fn new() -> Self {
        Self {
            devices: HashMap::new(),
            groups: HashSet::new(),
            behaviour: PublishBehaviour::Respond(None),
            published: Mutex::new(Vec::new()),
            resets: Mutex::new(Vec::new()),
            held: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_device(mut self, address: &str) -> Self {
        self.devices.insert(address.to_owned(), Device::new(address));
        self
    }

    pub(crate) fn with_modelled_device(mut self, address: &str, model: &str) -> Self {
        self.devices
            .insert(address.to_owned(), Device::new(address).with_model(model));
        self
    }

    pub(crate) fn with_group(mut self, group_id: u16) -> Self {
        self.groups.insert(group_id);
        self
    }

    pub(crate) fn with_behaviour(mut self, behaviour: PublishBehaviour) -> Self {
        self.behaviour = behaviour;
        self
    }

    pub(crate) fn published(&self) -> Vec<PublishRequest> {
        self.published.lock().expect("published mutex poisoned").clone()
    }

    pub(crate) fn resets(&self) -> Vec<String> {
        self.resets.lock().expect("resets mutex poisoned").clone()
    }

    fn settle(&self, completion: Completion) {
        match &self.behaviour {
            PublishBehaviour::Respond(message) => {
                completion.complete(PublishOutcome::delivered(message.clone()));
            }
            PublishBehaviour::Reject(message) => {
                completion.complete(PublishOutcome::failed(PublishError::rejected(message.clone())));
            }
            PublishBehaviour::Fail(message) => {
                completion.complete(PublishOutcome::failed(PublishError::failed(message.clone())));
            }
            PublishBehaviour::FailWithMessage(message, response) => completion.complete(
                PublishOutcome::failed(PublishError::failed(message.clone()))
                    .with_message(response.clone()),
            ),
            PublishBehaviour::Hold => self
                .held
                .lock()
                .expect("held mutex poisoned")
                .push(completion),
        }
    }
}

impl Coordinator for RecordingCoordinator {
    fn device(&self, address: &str) -> Option<Device> {
        self.devices.get(address).cloned()
    }

    fn group(&self, group_id: u16) -> Option<Group> {
        self.groups.contains(&group_id).then(|| Group::new(group_id))
    }

    fn publish(&self, request: PublishRequest, completion: Completion) -> Result<(), PublishError> {
        if let PublishBehaviour::Reject(message) = &self.behaviour {
            return Err(PublishError::rejected(message.clone()));
        }
        self.published
            .lock()
            .expect("published mutex poisoned")
            .push(request);
        self.settle(completion);
        Ok(())
    }

    fn reset(&self, mode: &str, completion: Completion) {
        self.resets
            .lock()
            .expect("resets mutex poisoned")
            .push(mode.to_owned());
        self.settle(completion);
    }
}
