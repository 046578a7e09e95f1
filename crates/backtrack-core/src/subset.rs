//! Subset-sum problems and the states recorded while searching them.

use std::fmt;

use rand::Rng;

use crate::error::{BacktrackError, Result};

/// Default number of values in a randomly generated array.
pub const DEFAULT_RANDOM_COUNT: usize = 10;

/// Default upper bound (inclusive) for randomly generated values.
pub const DEFAULT_RANDOM_MAX: i64 = 20;

/// An integer array and the target sum to reach.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubsetSumProblem {
    numbers: Vec<i64>,
    target: i64,
}

impl SubsetSumProblem {
    pub fn new(numbers: Vec<i64>, target: i64) -> Self {
        Self { numbers, target }
    }

    /// Generates `count` values uniformly in `1..=max`.
    ///
    /// # Example
    ///
    /// ```
    /// use backtrack_core::SubsetSumProblem;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let problem = SubsetSumProblem::random(10, 20, 15, &mut rng);
    ///
    /// assert_eq!(problem.len(), 10);
    /// assert!(problem.numbers().iter().all(|&n| (1..=20).contains(&n)));
    /// ```
    pub fn random<R: Rng + ?Sized>(count: usize, max: i64, target: i64, rng: &mut R) -> Self {
        let max = max.max(1);
        let numbers = (0..count).map(|_| rng.random_range(1..=max)).collect();
        Self { numbers, target }
    }

    pub fn numbers(&self) -> &[i64] {
        &self.numbers
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

/// Parses a comma-separated list of integers such as `"2, 3,5"`.
///
/// # Errors
///
/// Returns [`BacktrackError::InvalidInput`] for empty input or any entry
/// that is not an integer.
pub fn parse_numbers(input: &str) -> Result<Vec<i64>> {
    let input = input.trim();
    if input.is_empty() {
        return Err(BacktrackError::InvalidInput("empty array".to_string()));
    }
    input
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<i64>()
                .map_err(|e| BacktrackError::InvalidInput(format!("'{}': {}", part, e)))
        })
        .collect()
}

/// Parses a target sum.
pub fn parse_target(input: &str) -> Result<i64> {
    let input = input.trim();
    input
        .parse::<i64>()
        .map_err(|e| BacktrackError::InvalidInput(format!("target '{}': {}", input, e)))
}

/// The action that produced a recorded state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubsetAction {
    /// Entry into a recursive call.
    Exploring,
    /// The running sum hit the target.
    SolutionFound,
    /// Index ran off the array or the sum overshot the target.
    Backtracking,
    /// `value` was pushed onto the candidate subset.
    Including { value: i64 },
    /// `value` was popped from the candidate subset.
    Excluding { value: i64 },
}

/// Immutable record of one point in a subset-sum search.
///
/// `sum` always equals the sum of `values`; `indices` holds the array
/// positions `values` were taken from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubsetSumState {
    pub index: usize,
    pub sum: i64,
    pub values: Vec<i64>,
    pub indices: Vec<usize>,
    pub action: SubsetAction,
}

impl SubsetSumState {
    pub fn new(
        index: usize,
        sum: i64,
        values: &[i64],
        indices: &[usize],
        action: SubsetAction,
    ) -> Self {
        Self {
            index,
            sum,
            values: values.to_vec(),
            indices: indices.to_vec(),
            action,
        }
    }

    /// Human-readable description of the action.
    pub fn description(&self) -> String {
        match self.action {
            SubsetAction::Exploring => format!("Exploring index {}", self.index),
            SubsetAction::SolutionFound => "Solution found!".to_string(),
            SubsetAction::Backtracking => format!("Backtracking from index {}", self.index),
            SubsetAction::Including { value } => {
                format!("Including {} at index {}", value, self.index)
            }
            SubsetAction::Excluding { value } => {
                format!("Excluding {} at index {}", value, self.index)
            }
        }
    }

    /// True if the array position `index` is part of the candidate subset.
    pub fn includes_index(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }
}

impl fmt::Display for SubsetSumState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.description())?;
        writeln!(f, "Index: {}", self.index)?;
        writeln!(f, "Current Sum: {}", self.sum)?;
        write!(f, "Current Subset: {:?}", self.values)
    }
}
