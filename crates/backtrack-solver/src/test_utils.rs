//! Channel and scope helpers for engine tests.

use std::time::Duration;

use crate::channel::{step_channel, StepReceiver};
use crate::engine::SearchEngine;
use crate::scope::SearchScope;

/// Scope without pacing, plus its receiver.
pub fn fast_scope<T>() -> (SearchScope<T>, StepReceiver<T>) {
    let (sender, receiver) = step_channel();
    (SearchScope::new(sender), receiver)
}

/// Scope with the given pacing delay, plus its receiver.
pub fn paced_scope<T>(delay: Duration) -> (SearchScope<T>, StepReceiver<T>) {
    let (sender, receiver) = step_channel();
    (SearchScope::new(sender).with_step_delay(delay), receiver)
}

/// Runs `engine` to completion and returns its report with every snapshot.
pub fn run_to_end<E: SearchEngine>(engine: &mut E) -> (E::Report, Vec<E::Snapshot>) {
    let (mut scope, mut receiver) = fast_scope();
    let report = engine.search(&mut scope);
    drop(scope);
    (report, drain_snapshots(&mut receiver))
}

/// Receives until the producer side is dropped.
pub fn drain_snapshots<T>(receiver: &mut StepReceiver<T>) -> Vec<T> {
    let mut out = Vec::new();
    while let Some(snapshot) = receiver.blocking_recv() {
        out.push(snapshot);
    }
    out
}
