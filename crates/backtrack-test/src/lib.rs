//! Shared test fixtures for the backtrack crates.
//!
//! Pure helpers only: this crate depends on `backtrack-core` and
//! `backtrack-config`, never on the solver, so the solver can use it as a
//! dev-dependency.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! backtrack-test = { workspace = true }
//! ```

use std::collections::BTreeSet;
use std::time::Duration;

use backtrack_config::SearchConfig;
use backtrack_core::{is_valid_solution, Placement, SubsetSumProblem};

/// Seed used by [`fast_config`].
pub const TEST_SEED: u64 = 42;

/// Zero pacing and a fixed seed.
pub fn fast_config() -> SearchConfig {
    SearchConfig::new()
        .with_step_delay(Duration::ZERO)
        .with_random_seed(TEST_SEED)
}

/// Builds a placement with every column set.
///
/// # Panics
///
/// Panics if `rows` is empty or a row is out of range.
pub fn placement_from_rows(rows: &[usize]) -> Placement {
    Placement::from_rows(rows).expect("rows describe a valid board")
}

/// Asserts that `placement` is complete and free of attacks.
///
/// # Panics
///
/// Panics with the rendered board otherwise.
pub fn assert_valid_placement(placement: &Placement) {
    assert!(
        placement.is_complete(),
        "placement is incomplete: {}",
        placement
    );
    assert!(
        is_valid_solution(placement),
        "queens attack each other:\n{}",
        placement.render()
    );
}

/// Asserts that columns after `column` are unset and columns up to it are set.
pub fn assert_prefix_placed(placement: &Placement, column: usize) {
    for col in 0..placement.size() {
        if col <= column {
            assert!(placement.get(col).is_some(), "column {} unset in {}", col, placement);
        } else {
            assert!(placement.get(col).is_none(), "column {} set in {}", col, placement);
        }
    }
}

/// Reference enumerator: every subset of positions whose values sum to the
/// target, as value lists in ascending position order.
///
/// Exponential in the input length; keep inputs small.
pub fn subset_sums_brute_force(problem: &SubsetSumProblem) -> BTreeSet<Vec<i64>> {
    let numbers = problem.numbers();
    assert!(numbers.len() < 24, "brute force input too large");

    let mut found = BTreeSet::new();
    for mask in 0u32..(1 << numbers.len()) {
        let chosen: Vec<i64> = numbers
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, &n)| n)
            .collect();
        if chosen.iter().sum::<i64>() == problem.target() {
            found.insert(chosen);
        }
    }
    found
}

/// `[2, 3, 5, 7, 11]` with target 10.
pub fn small_subset_problem() -> SubsetSumProblem {
    SubsetSumProblem::new(vec![2, 3, 5, 7, 11], 10)
}

/// A problem without any solution.
pub fn unsolvable_subset_problem() -> SubsetSumProblem {
    SubsetSumProblem::new(vec![4, 6, 8], 5)
}
