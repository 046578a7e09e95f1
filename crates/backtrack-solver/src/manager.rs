//! SearchManager: one search at a time, off the caller's thread.
//!
//! The manager spawns each search on a dedicated thread and hands the
//! caller a [`SearchJob`] holding the consumer side of the step channel.
//! Completed reports are folded into a [`SearchSession`] that survives
//! until [`SearchManager::reset`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use backtrack_config::SearchConfig;
use backtrack_core::{BacktrackError, PlacementSnapshot, Result, SubsetSumProblem, SubsetSumState};
use tracing::{debug, warn};

use crate::channel::{step_channel, CancelHandle, StepReceiver};
use crate::engine::backtracking::{BacktrackingReport, BacktrackingSearch};
use crate::engine::las_vegas::{
    LasVegasAttempt, LasVegasDriver, LasVegasEvent, LasVegasReport, LasVegasSearch,
};
use crate::engine::subset_sum::{SubsetSumReport, SubsetSumSearch};
use crate::engine::SearchEngine;
use crate::history::HistoryBuffer;
use crate::scope::SearchScope;

/// Whether a search is running on the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Running,
}

impl SearchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchStatus::Idle => "IDLE",
            SearchStatus::Running => "RUNNING",
        }
    }
}

/// Results kept between searches.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    pub backtracking: Option<BacktrackingReport>,
    pub las_vegas: Option<LasVegasReport>,
    pub las_vegas_attempt: Option<LasVegasAttempt>,
    pub subset_sum: Option<SubsetSumReport>,
    /// Steps across every completed search.
    pub total_steps: u64,
    /// Las Vegas attempts across every completed search.
    pub total_attempts: u64,
}

/// A report that knows where it belongs in the session.
pub trait SessionRecord: Send + 'static {
    fn record(&self, session: &mut SearchSession);
}

impl SessionRecord for BacktrackingReport {
    fn record(&self, session: &mut SearchSession) {
        session.total_steps += self.steps;
        session.backtracking = Some(self.clone());
    }
}

impl SessionRecord for LasVegasAttempt {
    fn record(&self, session: &mut SearchSession) {
        session.total_steps += self.steps;
        session.total_attempts += 1;
        session.las_vegas_attempt = Some(self.clone());
    }
}

impl SessionRecord for LasVegasReport {
    fn record(&self, session: &mut SearchSession) {
        session.total_steps += self.steps;
        session.total_attempts += self.attempts;
        session.las_vegas = Some(self.clone());
    }
}

impl SessionRecord for SubsetSumReport {
    fn record(&self, session: &mut SearchSession) {
        session.total_steps += self.steps;
        session.subset_sum = Some(self.clone());
    }
}

/// Handle to a search running on its own thread.
#[derive(Debug)]
pub struct SearchJob<T, R> {
    receiver: StepReceiver<T>,
    handle: JoinHandle<R>,
}

impl<T, R> SearchJob<T, R> {
    /// Consumer side of the step channel.
    pub fn receiver(&mut self) -> &mut StepReceiver<T> {
        &mut self.receiver
    }

    /// Requests cooperative termination.
    pub fn cancel(&self) {
        self.receiver.cancel();
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.receiver.cancel_handle()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the terminal report.
    ///
    /// Snapshots still queued are dropped with the receiver.
    pub fn join(self) -> Result<R> {
        self.handle
            .join()
            .map_err(|_| BacktrackError::Internal("search thread panicked".to_string()))
    }
}

/// Clears the running flag when the search thread finishes or unwinds.
struct ActiveGuard(Arc<AtomicBool>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs searches one at a time and keeps the session between them.
///
/// # Example
///
/// ```
/// use backtrack_config::SearchConfig;
/// use backtrack_solver::{SearchManager, SearchStatus};
/// use std::time::Duration;
///
/// let manager = SearchManager::new(SearchConfig::new().with_step_delay(Duration::ZERO));
/// let mut job = manager.start_backtracking(6).unwrap();
///
/// while let Some(_snapshot) = job.receiver().blocking_recv() {}
/// let report = job.join().unwrap();
///
/// assert!(report.is_solved());
/// assert_eq!(manager.status(), SearchStatus::Idle);
/// assert!(manager.session().backtracking.is_some());
/// ```
#[derive(Debug)]
pub struct SearchManager {
    config: SearchConfig,
    active: Arc<AtomicBool>,
    session: Arc<Mutex<SearchSession>>,
    current: Mutex<Option<CancelHandle>>,
}

impl Default for SearchManager {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl SearchManager {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            active: Arc::new(AtomicBool::new(false)),
            session: Arc::new(Mutex::new(SearchSession::default())),
            current: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn status(&self) -> SearchStatus {
        if self.active.load(Ordering::SeqCst) {
            SearchStatus::Running
        } else {
            SearchStatus::Idle
        }
    }

    /// Starts `engine` on a new thread.
    ///
    /// # Errors
    ///
    /// [`BacktrackError::SearchInProgress`] if a search is already running.
    pub fn start<E>(&self, engine: E) -> Result<SearchJob<E::Snapshot, E::Report>>
    where
        E: SearchEngine + 'static,
        E::Report: SessionRecord,
    {
        // Held until the new handle is stored, so cancel() never sees a
        // running flag paired with the previous job's handle.
        let mut current = lock(&self.current);
        if self
            .active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!(event = "start_refused", engine = engine.engine_name());
            return Err(BacktrackError::SearchInProgress);
        }
        let guard = ActiveGuard(Arc::clone(&self.active));

        let (sender, receiver) = step_channel();
        *current = Some(receiver.cancel_handle());
        drop(current);

        let mut scope = SearchScope::new(sender).with_step_delay(self.config.pacing.step_delay());
        let session = Arc::clone(&self.session);
        let name = engine.engine_name();
        debug!(event = "job_start", engine = name);

        let handle = thread::Builder::new()
            .name(format!("search-{}", name.to_lowercase()))
            .spawn(move || {
                let mut engine = engine;
                let report = engine.search(&mut scope);
                report.record(&mut lock(&session));
                // Idle by the time the consumer sees the channel close.
                drop(guard);
                drop(scope);
                report
            })
            .map_err(|e| BacktrackError::Internal(format!("failed to spawn search: {}", e)))?;

        Ok(SearchJob { receiver, handle })
    }

    pub fn start_backtracking(
        &self,
        board_size: usize,
    ) -> Result<SearchJob<PlacementSnapshot, BacktrackingReport>> {
        self.start(BacktrackingSearch::new(board_size)?)
    }

    /// Starts a single Las Vegas attempt.
    ///
    /// Attempt numbers continue from the session's attempt count.
    pub fn start_las_vegas_attempt(
        &self,
        board_size: usize,
    ) -> Result<SearchJob<LasVegasEvent, LasVegasAttempt>> {
        self.start(self.las_vegas_search(board_size)?)
    }

    /// Starts the Las Vegas retry loop, capped by the configured attempts.
    pub fn start_las_vegas(
        &self,
        board_size: usize,
    ) -> Result<SearchJob<LasVegasEvent, LasVegasReport>> {
        let search = self.las_vegas_search(board_size)?;
        self.start(LasVegasDriver::new(search, self.config.las_vegas.max_attempts))
    }

    pub fn start_subset_sum(
        &self,
        problem: SubsetSumProblem,
    ) -> Result<SearchJob<SubsetSumState, SubsetSumReport>> {
        self.start(SubsetSumSearch::new(problem))
    }

    fn las_vegas_search(&self, board_size: usize) -> Result<LasVegasSearch> {
        let previous = lock(&self.session).total_attempts;
        let search = match self.config.random_seed {
            Some(seed) => LasVegasSearch::with_seed(board_size, seed.wrapping_add(previous))?,
            None => LasVegasSearch::new(board_size)?,
        };
        Ok(search.starting_after(previous))
    }

    /// Cancels the running search. Returns false if nothing was running.
    pub fn cancel(&self) -> bool {
        let current = lock(&self.current);
        if self.status() == SearchStatus::Idle {
            return false;
        }
        match current.as_ref() {
            Some(handle) => {
                handle.cancel();
                debug!(event = "cancel_requested");
                true
            }
            None => false,
        }
    }

    /// Snapshot of the session.
    pub fn session(&self) -> SearchSession {
        lock(&self.session).clone()
    }

    /// History of the last completed subset-sum search, cursor at the start.
    ///
    /// # Errors
    ///
    /// [`BacktrackError::NoCompletedRun`] if no subset-sum search has completed.
    pub fn replay(&self) -> Result<HistoryBuffer<SubsetSumState>> {
        let session = lock(&self.session);
        let report = session
            .subset_sum
            .as_ref()
            .ok_or(BacktrackError::NoCompletedRun)?;
        let mut history = report.history.clone();
        history.rewind();
        Ok(history)
    }

    /// Discards the session: no results, zero counters, empty history.
    ///
    /// # Errors
    ///
    /// [`BacktrackError::SearchInProgress`] while a search is running.
    pub fn reset(&self) -> Result<()> {
        let mut current = lock(&self.current);
        if self.status() == SearchStatus::Running {
            return Err(BacktrackError::SearchInProgress);
        }
        *lock(&self.session) = SearchSession::default();
        *current = None;
        debug!(event = "session_reset");
        Ok(())
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
