//! Backtrack Core - shared types for the combinatorial search engines
//!
//! This crate provides the fundamental abstractions the engines build on:
//! - Board placements and the snapshots handed to consumers
//! - The N-Queens safety predicate
//! - Subset-sum problems and recorded search states
//! - Algorithm descriptions and the common error type

pub mod algorithm;
pub mod board;
pub mod constraint;
pub mod error;
pub mod subset;

#[cfg(test)]
mod subset_tests;

pub use algorithm::{Algorithm, Complexity};
pub use board::{Placement, PlacementSnapshot};
pub use constraint::{is_safe, is_valid_solution, safe_rows};
pub use error::{BacktrackError, Result};
pub use subset::{parse_numbers, parse_target, SubsetAction, SubsetSumProblem, SubsetSumState};
