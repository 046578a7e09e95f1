//! Exhaustive backtracking N-Queens search.

use std::fmt;
use std::time::Duration;

use backtrack_core::{is_safe, Placement, PlacementSnapshot, Result};
use tracing::{info, trace, warn};

use super::{Descent, SearchEngine, SearchOutcome};
use crate::scope::SearchScope;

/// Terminal result of a backtracking search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacktrackingReport {
    pub outcome: SearchOutcome,
    /// The full solution, or the partial board where the search stopped.
    pub placement: Placement,
    pub steps: u64,
    pub elapsed: Duration,
}

impl BacktrackingReport {
    pub fn is_solved(&self) -> bool {
        self.outcome.is_solved()
    }
}

impl fmt::Display for BacktrackingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.elapsed.as_millis();
        match self.outcome {
            SearchOutcome::Solved => {
                write!(f, "Backtracking solved in {} steps ({} ms)", self.steps, ms)
            }
            SearchOutcome::Failed => write!(
                f,
                "Backtracking exhausted {} steps without a solution ({} ms)",
                self.steps, ms
            ),
            SearchOutcome::Cancelled => {
                write!(f, "Backtracking cancelled after {} steps ({} ms)", self.steps, ms)
            }
        }
    }
}

/// Deterministic depth-first queen placement.
///
/// Tries rows in ascending order for each column, recursing on every safe
/// row, and stops at the first complete placement. Each tentative placement
/// is emitted as a [`PlacementSnapshot`] followed by the pacing pause.
///
/// # Example
///
/// ```
/// use backtrack_solver::{step_channel, BacktrackingSearch, SearchEngine, SearchScope};
///
/// let (sender, mut receiver) = step_channel();
/// let mut scope = SearchScope::new(sender);
/// let mut search = BacktrackingSearch::new(4).unwrap();
///
/// let report = search.search(&mut scope);
/// assert!(report.is_solved());
/// assert_eq!(report.placement.to_rows(), Some(vec![1, 3, 0, 2]));
///
/// drop(scope);
/// assert!(!receiver.drain().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BacktrackingSearch {
    board_size: usize,
    placement: Placement,
}

impl BacktrackingSearch {
    /// Creates a search for an `board_size`x`board_size` board.
    pub fn new(board_size: usize) -> Result<Self> {
        Ok(Self {
            board_size,
            placement: Placement::new(board_size)?,
        })
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    fn place_column(&mut self, col: usize, scope: &mut SearchScope<PlacementSnapshot>) -> Descent {
        scope.increment_step_count();
        if scope.is_cancelled() {
            return Descent::Cancelled;
        }
        if col == self.board_size {
            return Descent::Found;
        }

        for row in 0..self.board_size {
            if !is_safe(row, col, &self.placement) {
                continue;
            }
            self.placement.place(col, row);

            let step = scope.step_count();
            trace!(event = "step", step, column = col, row);
            scope.emit(PlacementSnapshot::new(self.placement.clone(), col, row, step));

            if !scope.pause() {
                return Descent::Cancelled;
            }
            match self.place_column(col + 1, scope) {
                Descent::Continue => {}
                done => return done,
            }
        }

        self.placement.clear_from(col);
        Descent::Continue
    }
}

impl SearchEngine for BacktrackingSearch {
    type Snapshot = PlacementSnapshot;
    type Report = BacktrackingReport;

    fn search(&mut self, scope: &mut SearchScope<PlacementSnapshot>) -> BacktrackingReport {
        self.placement.clear();
        scope.start_search();

        info!(
            event = "search_start",
            engine = self.engine_name(),
            board_size = self.board_size as u64,
        );

        let descent = self.place_column(0, scope);
        let outcome = if scope.is_cancelled() {
            SearchOutcome::Cancelled
        } else {
            match descent {
                Descent::Found => SearchOutcome::Solved,
                Descent::Continue => SearchOutcome::Failed,
                Descent::Cancelled => SearchOutcome::Cancelled,
            }
        };

        let report = BacktrackingReport {
            outcome,
            placement: self.placement.clone(),
            steps: scope.step_count(),
            elapsed: scope.elapsed(),
        };

        if outcome == SearchOutcome::Failed {
            warn!(
                event = "exhausted",
                engine = self.engine_name(),
                board_size = self.board_size as u64,
            );
        }
        info!(
            event = "search_end",
            engine = self.engine_name(),
            outcome = outcome.as_str(),
            steps = report.steps,
            snapshots = scope.stats().snapshots_emitted,
            steps_per_sec = scope.stats().steps_per_second() as u64,
            duration_ms = report.elapsed.as_millis() as u64,
        );

        report
    }

    fn engine_name(&self) -> &'static str {
        "Backtracking"
    }
}
