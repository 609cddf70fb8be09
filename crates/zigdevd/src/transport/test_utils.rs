//! Test doubles for the transport module.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::{ConnectionHandler, ConnectionStream};

/// Handler that records the transport of every connection it receives.
#[derive(Default)]
pub(crate) struct RecordingHandler {
    transports: Mutex<Vec<&'static str>>,
}

impl RecordingHandler {
    pub(crate) fn transports(&self) -> Vec<&'static str> {
        self.transports
            .lock()
            .expect("transport mutex poisoned")
            .clone()
    }

    /// Polls until `expected` connections arrived or two seconds pass.
    pub(crate) fn wait_for(&self, expected: usize) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if self.transports().len() >= expected {
                return true;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        false
    }
}

impl ConnectionHandler for RecordingHandler {
    fn handle(&self, stream: ConnectionStream) {
        self.transports
            .lock()
            .expect("transport mutex poisoned")
            .push(stream.transport());
    }
}
