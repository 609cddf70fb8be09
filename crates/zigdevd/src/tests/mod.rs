//! Test suites for the zigdev dispatch daemon.

mod bootstrap_behaviour;
pub(crate) mod support;
