//! Backtrack Search Engines
//!
//! This crate provides the search implementations and their plumbing:
//! - Exhaustive backtracking and randomized Las Vegas N-Queens placement
//! - Include/exclude subset-sum enumeration with full history
//! - Step channel with cooperative cancellation
//! - History buffer for replaying a finished run
//! - Search manager that runs one search at a time off the caller's thread

pub mod channel;
pub mod engine;
pub mod history;
pub mod manager;
pub mod scope;
pub mod stats;

#[cfg(test)]
mod test_utils;

pub use channel::{step_channel, CancelHandle, StepReceiver, StepSender};
pub use engine::{
    backtracking::{BacktrackingReport, BacktrackingSearch},
    las_vegas::{
        solve_las_vegas, LasVegasAttempt, LasVegasDriver, LasVegasEvent, LasVegasReport,
        LasVegasSearch,
    },
    subset_sum::{SubsetSumReport, SubsetSumSearch},
    SearchEngine, SearchOutcome,
};
pub use history::{HistoryBuffer, ReplayMove};
pub use manager::{SearchJob, SearchManager, SearchSession, SearchStatus, SessionRecord};
pub use scope::SearchScope;
pub use stats::SearchStats;
