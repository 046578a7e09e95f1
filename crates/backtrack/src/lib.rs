//! Backtrack - combinatorial search with live step streaming
//!
//! N-Queens by exhaustive backtracking or randomized Las Vegas placement,
//! and subset-sum enumeration with a replayable history. Searches run on
//! their own thread and stream snapshots to the caller, who can cancel at
//! any time.
//!
//! # Example
//!
//! ```rust
//! use backtrack::prelude::*;
//!
//! let report = backtrack::solve_subset_sum(SubsetSumProblem::new(vec![2, 3, 5, 7, 11], 10));
//! assert_eq!(report.solutions, vec![vec![2, 3, 5], vec![3, 7]]);
//! ```

pub use backtrack_config::{ConfigError, SearchConfig};
pub use backtrack_core::{
    is_safe, is_valid_solution, parse_numbers, parse_target, safe_rows, Algorithm,
    BacktrackError, Complexity, Placement, PlacementSnapshot, Result, SubsetAction,
    SubsetSumProblem, SubsetSumState,
};
pub use backtrack_solver::{
    solve_las_vegas, step_channel, BacktrackingReport, BacktrackingSearch, CancelHandle,
    HistoryBuffer, LasVegasAttempt, LasVegasDriver, LasVegasEvent, LasVegasReport,
    LasVegasSearch, ReplayMove, SearchEngine, SearchJob, SearchManager, SearchOutcome,
    SearchScope, SearchSession, SearchStatus, StepReceiver, StepSender, SubsetSumReport,
    SubsetSumSearch,
};

#[cfg(feature = "console")]
pub use backtrack_console::init as init_console;

mod runner;
pub use runner::{
    drive, load_config, solve_queens, solve_queens_las_vegas, solve_subset_sum, CONFIG_FILE,
};

pub mod prelude {
    pub use super::{
        Placement, PlacementSnapshot, SearchConfig, SearchManager, SearchOutcome, SubsetSumProblem,
        SubsetSumState,
    };
    pub use super::{BacktrackingReport, LasVegasReport, SubsetSumReport};
    pub use super::{HistoryBuffer, ReplayMove};
    pub use std::ops::ControlFlow;
}
