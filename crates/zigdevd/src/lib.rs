//! Command dispatch daemon for a Zigbee coordinator.
//!
//! Clients connect over a Unix or TCP socket configured through
//! [`zigdev_config`] and send one JSONL envelope per connection. The daemon
//! answers ZCL metadata queries from the [`zigdev_zcl`] catalog, resolves
//! `sendToZigbee` requests into fully specified frames and hands them to a
//! [`Coordinator`], and passes `reset` requests straight through.
//!
//! Resolution is strict: a frame only reaches the coordinator once its
//! target, cluster, command descriptor and payload identifiers have all been
//! resolved. Any failure is reported back on the same connection and nothing
//! is sent.
//!
//! The bootstrap sequence loads configuration, installs structured
//! telemetry, prepares the socket filesystem and reports each stage through
//! a [`HealthReporter`].

mod bootstrap;
pub mod coordinator;
pub mod dispatch;
mod health;
mod process;
mod telemetry;
mod transport;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Daemon, RunningDaemon, StaticConfigLoader, SystemConfigLoader,
    bootstrap_with,
};
pub use coordinator::{
    CommandKind, Completion, Coordinator, Device, Group, PayloadEntry, PublishError,
    PublishOutcome, PublishRequest, Target,
};
pub use dispatch::{CommandResult, DispatchConnectionHandler, DispatchContext, DispatchError};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use process::{LaunchError, ShutdownError, ShutdownSignal, SystemShutdownSignal, run_daemon};
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use transport::{ListenerError, ListenerStep};

#[cfg(test)]
mod tests;
