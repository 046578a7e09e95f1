//! Error types for the backtrack engines

use thiserror::Error;

/// Main error type for backtrack operations.
///
/// Search failure and cancellation are ordinary outcomes and never show up
/// here; this type only covers rejected input and misuse of the manager.
#[derive(Debug, Error)]
pub enum BacktrackError {
    /// Board size must be at least 1
    #[error("Invalid board size: {0}")]
    InvalidBoardSize(usize),

    /// Malformed numeric input at the boundary
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A search is already running on this manager
    #[error("A search is already in progress")]
    SearchInProgress,

    /// Replay was requested before any subset-sum run completed
    #[error("No completed run to replay")]
    NoCompletedRun,

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for backtrack operations
pub type Result<T> = std::result::Result<T, BacktrackError>;
