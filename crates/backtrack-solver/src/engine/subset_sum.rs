//! Include/exclude subset-sum enumeration.

use std::fmt;
use std::time::Duration;

use backtrack_core::{SubsetAction, SubsetSumProblem, SubsetSumState};
use tracing::{debug, info, trace};

use super::{SearchEngine, SearchOutcome};
use crate::history::HistoryBuffer;
use crate::scope::SearchScope;

/// Terminal result of a subset-sum search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetSumReport {
    pub outcome: SearchOutcome,
    pub target: i64,
    /// Every subset found, in discovery order.
    pub solutions: Vec<Vec<i64>>,
    pub steps: u64,
    pub elapsed: Duration,
    /// Every state the search passed through, ready for replay.
    pub history: HistoryBuffer<SubsetSumState>,
}

impl SubsetSumReport {
    pub fn is_solved(&self) -> bool {
        self.outcome.is_solved()
    }
}

impl fmt::Display for SubsetSumReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.elapsed.as_millis();
        match self.outcome {
            SearchOutcome::Cancelled => write!(
                f,
                "Subset sum cancelled after {} steps with {} solutions ({} ms)",
                self.steps,
                self.solutions.len(),
                ms
            )?,
            SearchOutcome::Failed => write!(
                f,
                "No subset sums to {} ({} steps, {} ms)",
                self.target, self.steps, ms
            )?,
            SearchOutcome::Solved => write!(
                f,
                "Found {} solutions in {} steps ({} ms)",
                self.solutions.len(),
                self.steps,
                ms
            )?,
        }
        for (i, solution) in self.solutions.iter().enumerate() {
            write!(f, "\n{}. {:?}", i + 1, solution)?;
        }
        Ok(())
    }
}

/// Enumerates every subset (by position) whose sum equals the target.
///
/// At each index the search first includes the value and recurses, then
/// removes it and recurses again. A branch stops when the running sum hits
/// the target (a solution, not extended further), when the index runs off
/// the array, or when the sum overshoots the target. The overshoot prune is
/// only sound for non-negative inputs; with negative values some solutions
/// may be missed. An include whose sum would overflow `i64` is skipped.
///
/// Every state is appended to the history and emitted, so the history is
/// complete even if the consumer drops snapshots.
///
/// # Example
///
/// ```
/// use backtrack_core::SubsetSumProblem;
/// use backtrack_solver::{step_channel, SearchEngine, SearchScope, SubsetSumSearch};
///
/// let (sender, _receiver) = step_channel();
/// let mut scope = SearchScope::new(sender);
/// let problem = SubsetSumProblem::new(vec![2, 3, 5, 7, 11], 10);
///
/// let report = SubsetSumSearch::new(problem).search(&mut scope);
/// assert_eq!(report.solutions, vec![vec![2, 3, 5], vec![3, 7]]);
/// ```
#[derive(Debug, Clone)]
pub struct SubsetSumSearch {
    problem: SubsetSumProblem,
    values: Vec<i64>,
    indices: Vec<usize>,
    history: HistoryBuffer<SubsetSumState>,
    solutions: Vec<Vec<i64>>,
}

impl SubsetSumSearch {
    pub fn new(problem: SubsetSumProblem) -> Self {
        Self {
            problem,
            values: Vec::new(),
            indices: Vec::new(),
            history: HistoryBuffer::new(),
            solutions: Vec::new(),
        }
    }

    pub fn problem(&self) -> &SubsetSumProblem {
        &self.problem
    }

    fn record(
        &mut self,
        index: usize,
        sum: i64,
        action: SubsetAction,
        scope: &mut SearchScope<SubsetSumState>,
    ) {
        let state = SubsetSumState::new(index, sum, &self.values, &self.indices, action);
        trace!(event = "step", index, sum, action = ?action);
        self.history.append(state.clone());
        scope.emit(state);
    }

    /// Returns false once the search has been cancelled.
    fn explore(&mut self, index: usize, sum: i64, scope: &mut SearchScope<SubsetSumState>) -> bool {
        scope.increment_step_count();
        if scope.is_cancelled() {
            return false;
        }
        self.record(index, sum, SubsetAction::Exploring, scope);

        let target = self.problem.target();
        if sum == target {
            self.solutions.push(self.values.clone());
            debug!(
                event = "solution_found",
                solution = ?self.values,
                count = self.solutions.len() as u64,
            );
            self.record(index, sum, SubsetAction::SolutionFound, scope);
            return true;
        }
        if index >= self.problem.len() || sum > target {
            self.record(index, sum, SubsetAction::Backtracking, scope);
            return true;
        }

        let value = self.problem.numbers()[index];

        // An include that overflows i64 is pruned like any overshoot.
        match sum.checked_add(value) {
            Some(included) => {
                self.values.push(value);
                self.indices.push(index);
                self.record(index, included, SubsetAction::Including { value }, scope);
                if !self.explore(index + 1, included, scope) {
                    return false;
                }
                self.values.pop();
                self.indices.pop();
            }
            None => {
                trace!(event = "sum_overflow", index, sum, value);
                self.record(index, sum, SubsetAction::Backtracking, scope);
            }
        }

        self.record(index, sum, SubsetAction::Excluding { value }, scope);
        self.explore(index + 1, sum, scope)
    }
}

impl SearchEngine for SubsetSumSearch {
    type Snapshot = SubsetSumState;
    type Report = SubsetSumReport;

    fn search(&mut self, scope: &mut SearchScope<SubsetSumState>) -> SubsetSumReport {
        self.values.clear();
        self.indices.clear();
        self.solutions.clear();
        self.history = HistoryBuffer::new();
        scope.start_search();

        info!(
            event = "search_start",
            engine = self.engine_name(),
            size = self.problem.len() as u64,
            target = self.problem.target(),
        );

        self.explore(0, 0, scope);

        let outcome = if scope.is_cancelled() {
            SearchOutcome::Cancelled
        } else if self.solutions.is_empty() {
            SearchOutcome::Failed
        } else {
            SearchOutcome::Solved
        };

        let report = SubsetSumReport {
            outcome,
            target: self.problem.target(),
            solutions: std::mem::take(&mut self.solutions),
            steps: scope.step_count(),
            elapsed: scope.elapsed(),
            history: std::mem::take(&mut self.history),
        };

        info!(
            event = "search_end",
            engine = self.engine_name(),
            outcome = outcome.as_str(),
            steps = report.steps,
            solutions = report.solutions.len() as u64,
            history = report.history.len() as u64,
            steps_per_sec = scope.stats().steps_per_second() as u64,
            duration_ms = report.elapsed.as_millis() as u64,
        );

        report
    }

    fn engine_name(&self) -> &'static str {
        "SubsetSum"
    }
}
