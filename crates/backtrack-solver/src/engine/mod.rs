//! Search engines.
//!
//! Every engine explores its space depth-first, emits snapshots through the
//! [`SearchScope`], polls for cancellation at each recursion boundary, and
//! returns exactly one report carrying a [`SearchOutcome`].
//!
//! # Engines
//!
//! - **Backtracking**: exhaustive queen placement, first solution wins
//! - **Las Vegas**: one randomized placement attempt, restarted by a driver
//! - **Subset sum**: include/exclude enumeration of every solution

pub mod backtracking;
pub mod las_vegas;
pub mod subset_sum;

use std::fmt::{self, Debug};

use crate::scope::SearchScope;

/// How a search invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchOutcome {
    /// The search produced its result.
    Solved,
    /// The search ran to completion without a result (dead end, exhaustion).
    Failed,
    /// The consumer stopped the search.
    Cancelled,
}

impl SearchOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchOutcome::Solved => "solved",
            SearchOutcome::Failed => "failed",
            SearchOutcome::Cancelled => "cancelled",
        }
    }

    pub fn is_solved(self) -> bool {
        self == SearchOutcome::Solved
    }

    pub fn is_cancelled(self) -> bool {
        self == SearchOutcome::Cancelled
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A search that can run on its own thread and stream snapshots.
///
/// # Type Parameters
/// * `Snapshot` - What the engine pushes to the consumer while running
/// * `Report` - The terminal result of one invocation
pub trait SearchEngine: Send + Debug {
    type Snapshot: Send + 'static;
    type Report: Send + 'static;

    /// Runs one search invocation to its terminal report.
    fn search(&mut self, scope: &mut SearchScope<Self::Snapshot>) -> Self::Report;

    /// Returns the engine name used in logs.
    fn engine_name(&self) -> &'static str;
}

/// Control flow of a recursive descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Descent {
    /// Keep exploring siblings.
    Continue,
    /// Stop and unwind with success.
    Found,
    /// Stop and unwind because the consumer cancelled.
    Cancelled,
}

#[cfg(test)]
mod tests;
