//! Randomized Las Vegas N-Queens placement.
//!
//! One invocation of [`LasVegasSearch`] is one attempt: columns are filled
//! left to right with a row drawn uniformly from the currently safe rows,
//! and the attempt fails outright at the first column without a safe row.
//! Retrying is the caller's business; [`solve_las_vegas`] and
//! [`LasVegasDriver`] provide the usual retry loop.

use std::fmt::{self, Debug};
use std::time::{Duration, Instant};

use backtrack_core::{safe_rows, Placement, PlacementSnapshot, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use super::{SearchEngine, SearchOutcome};
use crate::scope::SearchScope;

/// Snapshot stream of a Las Vegas search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LasVegasEvent {
    /// A queen was placed.
    Placed(PlacementSnapshot),
    /// An attempt finished.
    AttemptEnded {
        attempt: u64,
        outcome: SearchOutcome,
        /// Queens placed before the attempt ended.
        placed: usize,
    },
}

/// Terminal result of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LasVegasAttempt {
    pub outcome: SearchOutcome,
    pub placement: Placement,
    /// Attempt number, counted across invocations of the same search.
    pub attempt: u64,
    pub steps: u64,
    pub elapsed: Duration,
}

impl LasVegasAttempt {
    pub fn is_solved(&self) -> bool {
        self.outcome.is_solved()
    }
}

impl fmt::Display for LasVegasAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            SearchOutcome::Solved => write!(
                f,
                "Las Vegas solved on attempt {} ({} ms)",
                self.attempt,
                self.elapsed.as_millis()
            ),
            SearchOutcome::Failed => {
                write!(f, "Las Vegas failed attempt {}, retrying...", self.attempt)
            }
            SearchOutcome::Cancelled => write!(f, "Las Vegas attempt {} cancelled", self.attempt),
        }
    }
}

/// Terminal result of a retry loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LasVegasReport {
    pub outcome: SearchOutcome,
    /// Placement from the last attempt.
    pub placement: Placement,
    /// Attempts made by this loop.
    pub attempts: u64,
    pub steps: u64,
    pub elapsed: Duration,
}

impl LasVegasReport {
    pub fn is_solved(&self) -> bool {
        self.outcome.is_solved()
    }
}

impl fmt::Display for LasVegasReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.elapsed.as_millis();
        match self.outcome {
            SearchOutcome::Solved => {
                write!(f, "Las Vegas solved in {} attempts ({} ms)", self.attempts, ms)
            }
            SearchOutcome::Failed => {
                write!(f, "Las Vegas gave up after {} attempts ({} ms)", self.attempts, ms)
            }
            SearchOutcome::Cancelled => {
                write!(f, "Las Vegas cancelled after {} attempts ({} ms)", self.attempts, ms)
            }
        }
    }
}

/// Single-attempt randomized queen placement.
///
/// # Example
///
/// ```
/// use backtrack_solver::{step_channel, LasVegasSearch, SearchScope};
///
/// let (sender, _receiver) = step_channel();
/// let mut scope = SearchScope::new(sender);
/// let mut search = LasVegasSearch::with_seed(8, 42).unwrap();
///
/// let attempt = search.attempt(&mut scope);
/// assert_eq!(attempt.attempt, 1);
/// assert_eq!(search.attempts(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct LasVegasSearch<R = ChaCha8Rng> {
    board_size: usize,
    placement: Placement,
    rng: R,
    attempts: u64,
}

impl LasVegasSearch<ChaCha8Rng> {
    /// Creates a search seeded from OS entropy.
    pub fn new(board_size: usize) -> Result<Self> {
        Self::with_rng(board_size, ChaCha8Rng::from_os_rng())
    }

    /// Creates a reproducible search.
    pub fn with_seed(board_size: usize, seed: u64) -> Result<Self> {
        Self::with_rng(board_size, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> LasVegasSearch<R> {
    pub fn with_rng(board_size: usize, rng: R) -> Result<Self> {
        Ok(Self {
            board_size,
            placement: Placement::new(board_size)?,
            rng,
            attempts: 0,
        })
    }

    /// Continues attempt numbering after `attempts` earlier attempts.
    pub fn starting_after(mut self, attempts: u64) -> Self {
        self.attempts = attempts;
        self
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Attempts made so far, whatever their outcome.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Zeroes the attempt counter and clears the board.
    pub fn reset(&mut self) {
        self.attempts = 0;
        self.placement.clear();
    }

    /// Runs one placement attempt.
    ///
    /// Emits one [`LasVegasEvent::Placed`] per queen and a closing
    /// [`LasVegasEvent::AttemptEnded`].
    pub fn attempt(&mut self, scope: &mut SearchScope<LasVegasEvent>) -> LasVegasAttempt {
        let started = Instant::now();
        self.attempts += 1;
        scope.increment_attempt_count();
        self.placement.clear();

        let mut outcome = SearchOutcome::Solved;
        for col in 0..self.board_size {
            scope.increment_step_count();
            if scope.is_cancelled() {
                outcome = SearchOutcome::Cancelled;
                break;
            }

            let rows = safe_rows(col, &self.placement);
            if rows.is_empty() {
                outcome = SearchOutcome::Failed;
                break;
            }
            let row = rows[self.rng.random_range(0..rows.len())];
            self.placement.place(col, row);

            let step = scope.step_count();
            trace!(event = "step", step, column = col, row);
            scope.emit(LasVegasEvent::Placed(PlacementSnapshot::new(
                self.placement.clone(),
                col,
                row,
                step,
            )));

            if !scope.pause() {
                outcome = SearchOutcome::Cancelled;
                break;
            }
        }
        if scope.is_cancelled() {
            outcome = SearchOutcome::Cancelled;
        }

        let placed = self.placement.placed_count();
        scope.emit(LasVegasEvent::AttemptEnded {
            attempt: self.attempts,
            outcome,
            placed,
        });
        debug!(
            event = "attempt_end",
            attempt = self.attempts,
            outcome = outcome.as_str(),
            placed = placed as u64,
        );

        LasVegasAttempt {
            outcome,
            placement: self.placement.clone(),
            attempt: self.attempts,
            steps: scope.step_count(),
            elapsed: started.elapsed(),
        }
    }
}

impl<R: Rng + Send + Debug> SearchEngine for LasVegasSearch<R> {
    type Snapshot = LasVegasEvent;
    type Report = LasVegasAttempt;

    fn search(&mut self, scope: &mut SearchScope<LasVegasEvent>) -> LasVegasAttempt {
        scope.start_search();
        info!(
            event = "search_start",
            engine = self.engine_name(),
            board_size = self.board_size as u64,
        );

        let attempt = self.attempt(scope);

        info!(
            event = "search_end",
            engine = self.engine_name(),
            outcome = attempt.outcome.as_str(),
            steps = attempt.steps,
            attempts = attempt.attempt,
            duration_ms = attempt.elapsed.as_millis() as u64,
        );
        attempt
    }

    fn engine_name(&self) -> &'static str {
        "LasVegas"
    }
}

/// Repeats attempts until one succeeds, the search is cancelled, or
/// `max_attempts` attempts have failed. A cap of zero makes no attempt and
/// reports `Failed` with an empty board.
///
/// No cap means retrying until solved; termination is then only
/// probabilistic, and boards without any solution (sizes 2 and 3) never
/// terminate on their own.
pub fn solve_las_vegas<R: Rng>(
    search: &mut LasVegasSearch<R>,
    scope: &mut SearchScope<LasVegasEvent>,
    max_attempts: Option<u64>,
) -> LasVegasReport {
    scope.start_search();
    info!(
        event = "search_start",
        engine = "LasVegas",
        board_size = search.board_size() as u64,
    );

    let first = search.attempts();
    let mut outcome = SearchOutcome::Failed;
    loop {
        if max_attempts.is_some_and(|max| search.attempts() - first >= max) {
            break;
        }
        outcome = search.attempt(scope).outcome;
        if outcome != SearchOutcome::Failed {
            break;
        }
    }

    let report = LasVegasReport {
        outcome,
        placement: search.placement.clone(),
        attempts: search.attempts() - first,
        steps: scope.step_count(),
        elapsed: scope.elapsed(),
    };
    info!(
        event = "search_end",
        engine = "LasVegas",
        outcome = report.outcome.as_str(),
        steps = report.steps,
        attempts = report.attempts,
        duration_ms = report.elapsed.as_millis() as u64,
    );
    report
}

/// Retry loop packaged as an engine, so it can run on a manager thread.
#[derive(Debug, Clone)]
pub struct LasVegasDriver<R = ChaCha8Rng> {
    search: LasVegasSearch<R>,
    max_attempts: Option<u64>,
}

impl<R: Rng> LasVegasDriver<R> {
    pub fn new(search: LasVegasSearch<R>, max_attempts: Option<u64>) -> Self {
        Self {
            search,
            max_attempts,
        }
    }

    pub fn search_ref(&self) -> &LasVegasSearch<R> {
        &self.search
    }
}

impl<R: Rng + Send + Debug> SearchEngine for LasVegasDriver<R> {
    type Snapshot = LasVegasEvent;
    type Report = LasVegasReport;

    fn search(&mut self, scope: &mut SearchScope<LasVegasEvent>) -> LasVegasReport {
        solve_las_vegas(&mut self.search, scope, self.max_attempts)
    }

    fn engine_name(&self) -> &'static str {
        "LasVegas"
    }
}
