//! Search-level scope.
//!
//! Everything a running engine needs besides its own working state: the
//! step channel, pacing, and statistics.

use std::thread;
use std::time::{Duration, Instant};

use crate::channel::StepSender;
use crate::stats::SearchStats;

/// Longest single sleep while pacing, so cancellation is noticed promptly.
const PACING_SLICE: Duration = Duration::from_millis(5);

/// Scope for one search invocation.
///
/// Owns the producer side of the step channel; dropping the scope closes
/// the channel and lets the consumer's receive loop end.
#[derive(Debug)]
pub struct SearchScope<T> {
    sender: StepSender<T>,
    step_delay: Duration,
    stats: SearchStats,
}

impl<T> SearchScope<T> {
    pub fn new(sender: StepSender<T>) -> Self {
        Self {
            sender,
            step_delay: Duration::ZERO,
            stats: SearchStats::default(),
        }
    }

    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    /// Starts the clock. Counters keep their values.
    pub fn start_search(&mut self) {
        self.stats.start();
    }

    pub fn elapsed(&self) -> Duration {
        self.stats.elapsed()
    }

    /// Sends a snapshot to the consumer without blocking.
    pub fn emit(&mut self, snapshot: T) {
        self.sender.emit(snapshot);
        self.stats.record_snapshot();
    }

    pub fn is_cancelled(&self) -> bool {
        self.sender.is_cancelled()
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.stats.record_step()
    }

    pub fn increment_attempt_count(&mut self) -> u64 {
        self.stats.record_attempt()
    }

    pub fn step_count(&self) -> u64 {
        self.stats.step_count
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Sleeps for the pacing delay, waking early on cancellation.
    ///
    /// Returns false if the search was cancelled before or during the pause.
    pub fn pause(&self) -> bool {
        if self.step_delay.is_zero() {
            return !self.is_cancelled();
        }
        let deadline = Instant::now() + self.step_delay;
        loop {
            if self.is_cancelled() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep((deadline - now).min(PACING_SLICE));
        }
    }
}
