//! Shared doubles for the daemon test suites.

mod config_loader;
mod coordinator;
mod reporter;

pub(crate) use self::config_loader::{FailingConfigLoader, TestConfigLoader, tcp_config};
pub(crate) use self::coordinator::{MockCoordinator, PublishBehaviour, RecordingCoordinator};
pub(crate) use self::reporter::{HealthEvent, ImmediateShutdown, RecordingHealthReporter};
