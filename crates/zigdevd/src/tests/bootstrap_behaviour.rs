//! Behavioural tests for the daemon bootstrap sequence.

use std::cell::RefCell;
use std::sync::Arc;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::bootstrap::{BootstrapError, ConfigLoader, Daemon, RunningDaemon, bootstrap_with};
use crate::coordinator::DetachedCoordinator;

use super::support::{FailingConfigLoader, HealthEvent, RecordingHealthReporter, TestConfigLoader};

struct BootstrapWorld {
    loader: Box<dyn ConfigLoader>,
    reporter: Arc<RecordingHealthReporter>,
    daemon: Option<Daemon>,
    running: Option<RunningDaemon>,
    error: Option<BootstrapError>,
}

impl BootstrapWorld {
    fn new() -> Self {
        Self {
            loader: Box::new(TestConfigLoader::new()),
            reporter: Arc::new(RecordingHealthReporter::default()),
            daemon: None,
            running: None,
            error: None,
        }
    }

    fn bootstrap(&mut self) {
        match bootstrap_with(
            &*self.loader,
            self.reporter.clone(),
            Arc::new(DetachedCoordinator),
        ) {
            Ok(daemon) => self.daemon = Some(daemon),
            Err(error) => self.error = Some(error),
        }
    }
}

impl Drop for BootstrapWorld {
    fn drop(&mut self) {
        if let Some(running) = self.running.take() {
            let _ = running.stop();
        }
    }
}

#[fixture]
fn world() -> RefCell<BootstrapWorld> {
    RefCell::new(BootstrapWorld::new())
}

#[given("a working configuration loader")]
fn given_working_loader(world: &RefCell<BootstrapWorld>) {
    world.borrow_mut().loader = Box::new(TestConfigLoader::new());
}

#[given("a failing configuration loader")]
fn given_failing_loader(world: &RefCell<BootstrapWorld>) {
    world.borrow_mut().loader = Box::new(FailingConfigLoader);
}

#[when("the daemon bootstraps")]
fn when_bootstraps(world: &RefCell<BootstrapWorld>) {
    world.borrow_mut().bootstrap();
}

#[when("the daemon starts serving")]
fn when_serving(world: &RefCell<BootstrapWorld>) {
    let mut world = world.borrow_mut();
    let daemon = world.daemon.take().expect("bootstrapped daemon");
    world.running = Some(daemon.serve().expect("listener should start"));
}

#[when("the daemon stops")]
fn when_stops(world: &RefCell<BootstrapWorld>) {
    let running = world.borrow_mut().running.take().expect("running daemon");
    running.stop().expect("listener should stop");
}

#[then("bootstrap succeeds")]
fn then_bootstrap_succeeds(world: &RefCell<BootstrapWorld>) {
    let world = world.borrow();
    assert!(world.error.is_none(), "unexpected error: {:?}", world.error);
    assert!(world.daemon.is_some());
}

#[then("bootstrap fails with a configuration error")]
fn then_configuration_error(world: &RefCell<BootstrapWorld>) {
    assert!(matches!(
        world.borrow().error,
        Some(BootstrapError::Configuration { .. })
    ));
}

#[then("the health reporter saw bootstrap start and success")]
fn then_saw_success(world: &RefCell<BootstrapWorld>) {
    assert_eq!(
        world.borrow().reporter.events(),
        vec![HealthEvent::BootstrapStarting, HealthEvent::BootstrapSucceeded]
    );
}

#[then("the health reporter saw bootstrap failure")]
fn then_saw_failure(world: &RefCell<BootstrapWorld>) {
    let events = world.borrow().reporter.events();
    assert!(matches!(
        events.as_slice(),
        [HealthEvent::BootstrapStarting, HealthEvent::BootstrapFailed(_)]
    ));
}

#[then("the health reporter saw the listener start and stop")]
fn then_saw_listener_lifecycle(world: &RefCell<BootstrapWorld>) {
    let events = world.borrow().reporter.events();
    assert!(matches!(
        events.as_slice(),
        [
            HealthEvent::BootstrapStarting,
            HealthEvent::BootstrapSucceeded,
            HealthEvent::ListenerReady(ready),
            HealthEvent::ListenerStopped(stopped),
        ] if ready == stopped && ready.starts_with("unix://")
    ));
}

#[scenario(
    path = "tests/features/daemon_bootstrap.feature",
    name = "Successful bootstrap reports health events"
)]
fn bootstrap_success(#[from(world)] world: RefCell<BootstrapWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/daemon_bootstrap.feature",
    name = "Configuration errors are reported"
)]
fn bootstrap_failure(#[from(world)] world: RefCell<BootstrapWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/daemon_bootstrap.feature",
    name = "A bootstrapped daemon serves and stops its listener"
)]
fn bootstrap_serves(#[from(world)] world: RefCell<BootstrapWorld>) {
    drop(world);
}
