//! Search statistics.
//!
//! Counters for one search invocation. They only grow while the search
//! runs and go back to zero through [`SearchStats::reset`].

use std::time::{Duration, Instant};

/// Step, attempt and emission counters plus wall time.
///
/// # Example
///
/// ```
/// use backtrack_solver::stats::SearchStats;
///
/// let mut stats = SearchStats::default();
/// stats.start();
/// stats.record_step();
/// stats.record_step();
/// stats.record_snapshot();
///
/// assert_eq!(stats.step_count, 2);
/// assert_eq!(stats.snapshots_emitted, 1);
///
/// stats.reset();
/// assert_eq!(stats.step_count, 0);
/// ```
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    start_time: Option<Instant>,
    /// Recursive calls (backtracking, subset-sum) or column visits (Las Vegas).
    pub step_count: u64,
    /// Las Vegas attempts started.
    pub attempt_count: u64,
    /// Snapshots pushed to the step channel.
    pub snapshots_emitted: u64,
}

impl SearchStats {
    /// Marks the start of searching.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Returns the elapsed time since searching started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    /// Records a step and returns the new count.
    pub fn record_step(&mut self) -> u64 {
        self.step_count += 1;
        self.step_count
    }

    /// Records an attempt and returns the new count.
    pub fn record_attempt(&mut self) -> u64 {
        self.attempt_count += 1;
        self.attempt_count
    }

    pub fn record_snapshot(&mut self) {
        self.snapshots_emitted += 1;
    }

    /// Steps per second since the start.
    pub fn steps_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.step_count as f64 / secs
        } else {
            0.0
        }
    }

    /// Discards every counter and the start time.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
