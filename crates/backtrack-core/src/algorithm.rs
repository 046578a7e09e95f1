//! Descriptions of the three search algorithms.
//!
//! Consumers use these to explain what a running search is doing without
//! hard-coding the text themselves.

use std::fmt;

/// The search algorithms provided by the engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Deterministic exhaustive queen placement.
    Backtracking,
    /// Randomized queen placement with restarts.
    LasVegas,
    /// Include/exclude enumeration of all subsets.
    SubsetSum,
}

/// Asymptotic cost of an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Complexity {
    pub worst: &'static str,
    pub average: &'static str,
    pub best: &'static str,
    pub space: &'static str,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Backtracking => "Backtracking",
            Algorithm::LasVegas => "Las Vegas",
            Algorithm::SubsetSum => "Subset Sum",
        }
    }

    /// Ordered steps of the algorithm.
    pub fn explanation(self) -> &'static [&'static str] {
        match self {
            Algorithm::Backtracking => &[
                "Places queens column by column",
                "For each column, tries every row",
                "If safe, proceeds to next column",
                "If no safe row, backtracks",
            ],
            Algorithm::LasVegas => &[
                "Randomly places queens column by column",
                "For each column, selects a random safe row",
                "If no safe row, restarts",
                "Continues until solution found",
            ],
            Algorithm::SubsetSum => &[
                "Visits the array left to right",
                "Branches on including the current value",
                "Then branches on excluding it",
                "Records a solution whenever the sum hits the target",
                "Backtracks when the array is exhausted or the sum overshoots",
            ],
        }
    }

    pub fn complexity(self) -> Complexity {
        match self {
            Algorithm::Backtracking => Complexity {
                worst: "O(N!)",
                average: "O(N!)",
                best: "O(N^2)",
                space: "O(N)",
            },
            Algorithm::LasVegas => Complexity {
                worst: "unbounded",
                average: "O(N^2) per attempt",
                best: "O(N^2)",
                space: "O(N)",
            },
            Algorithm::SubsetSum => Complexity {
                worst: "O(2^n)",
                average: "O(2^n)",
                best: "O(1)",
                space: "O(n)",
            },
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Complexity Analysis:")?;
        writeln!(f, "1. Worst Case: {}", self.worst)?;
        writeln!(f, "2. Average Case: {}", self.average)?;
        writeln!(f, "3. Best Case: {}", self.best)?;
        write!(f, "Space Complexity: {}", self.space)
    }
}
