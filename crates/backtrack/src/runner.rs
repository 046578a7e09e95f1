//! Blocking entry points that hide the manager and channel wiring.

use std::ops::ControlFlow;
use std::time::Duration;

use backtrack_config::SearchConfig;
use backtrack_core::{Result, SubsetSumProblem};
use backtrack_solver::{
    step_channel, BacktrackingReport, BacktrackingSearch, LasVegasDriver, LasVegasReport,
    LasVegasSearch, SearchEngine, SearchJob, SearchScope, SubsetSumReport, SubsetSumSearch,
};
use tracing::debug;

/// Configuration file read by [`load_config`].
pub const CONFIG_FILE: &str = "backtrack.toml";

/// Loads [`CONFIG_FILE`] from the working directory, or the defaults.
pub fn load_config() -> SearchConfig {
    SearchConfig::load(CONFIG_FILE).unwrap_or_default()
}

/// Feeds every snapshot of `job` to `on_snapshot` on the calling thread,
/// then returns the terminal report.
///
/// Returning [`ControlFlow::Break`] cancels the search; the remaining
/// snapshots are drained without calling `on_snapshot` again.
///
/// Blocks the calling thread; do not call from inside an async runtime.
pub fn drive<T, R, F>(mut job: SearchJob<T, R>, mut on_snapshot: F) -> Result<R>
where
    F: FnMut(&T) -> ControlFlow<()>,
{
    let mut cancelled = false;
    while let Some(snapshot) = job.receiver().blocking_recv() {
        if !cancelled && on_snapshot(&snapshot).is_break() {
            debug!(event = "consumer_cancel");
            job.cancel();
            cancelled = true;
        }
    }
    job.join()
}

/// Runs `engine` on the calling thread without pacing or consumer.
fn run_unobserved<E: SearchEngine>(mut engine: E) -> E::Report {
    let (sender, receiver) = step_channel();
    drop(receiver);
    let mut scope = SearchScope::new(sender).with_step_delay(Duration::ZERO);
    engine.search(&mut scope)
}

/// Finds the first N-Queens solution by backtracking.
pub fn solve_queens(board_size: usize) -> Result<BacktrackingReport> {
    Ok(run_unobserved(BacktrackingSearch::new(board_size)?))
}

/// Retries Las Vegas attempts under the seed and cap from [`load_config`].
pub fn solve_queens_las_vegas(board_size: usize) -> Result<LasVegasReport> {
    let config = load_config();
    let search = match config.random_seed {
        Some(seed) => LasVegasSearch::with_seed(board_size, seed)?,
        None => LasVegasSearch::new(board_size)?,
    };
    Ok(run_unobserved(LasVegasDriver::new(
        search,
        config.las_vegas.max_attempts,
    )))
}

/// Enumerates every subset of `problem` that reaches its target.
pub fn solve_subset_sum(problem: SubsetSumProblem) -> SubsetSumReport {
    run_unobserved(SubsetSumSearch::new(problem))
}
