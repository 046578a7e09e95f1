//! Tests for subset-sum inputs and states

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::algorithm::Algorithm;
use super::subset::*;

#[test]
fn test_parse_numbers() {
    assert_eq!(parse_numbers("2,3,5,7,11").unwrap(), vec![2, 3, 5, 7, 11]);
    assert_eq!(parse_numbers(" 4 , -1,0 ").unwrap(), vec![4, -1, 0]);
}

#[test]
fn test_parse_numbers_rejects_malformed() {
    assert!(parse_numbers("").is_err());
    assert!(parse_numbers("1,,2").is_err());
    assert!(parse_numbers("1,two").is_err());
}

#[test]
fn test_parse_target() {
    assert_eq!(parse_target(" 15 ").unwrap(), 15);
    assert!(parse_target("fifteen").is_err());
}

#[test]
fn test_random_problem_is_reproducible() {
    let a = SubsetSumProblem::random(
        DEFAULT_RANDOM_COUNT,
        DEFAULT_RANDOM_MAX,
        15,
        &mut ChaCha8Rng::seed_from_u64(3),
    );
    let b = SubsetSumProblem::random(
        DEFAULT_RANDOM_COUNT,
        DEFAULT_RANDOM_MAX,
        15,
        &mut ChaCha8Rng::seed_from_u64(3),
    );
    assert_eq!(a, b);
    assert_eq!(a.len(), DEFAULT_RANDOM_COUNT);
    assert!(a.numbers().iter().all(|&n| (1..=DEFAULT_RANDOM_MAX).contains(&n)));
}

#[test]
fn test_state_descriptions() {
    let state = SubsetSumState::new(2, 5, &[5], &[2], SubsetAction::Including { value: 5 });
    assert_eq!(state.description(), "Including 5 at index 2");
    assert!(state.includes_index(2));
    assert!(!state.includes_index(0));

    let state = SubsetSumState::new(3, 0, &[], &[], SubsetAction::Backtracking);
    assert_eq!(state.description(), "Backtracking from index 3");

    let state = SubsetSumState::new(1, 10, &[10], &[0], SubsetAction::SolutionFound);
    assert_eq!(state.description(), "Solution found!");
}

#[test]
fn test_state_display() {
    let state = SubsetSumState::new(1, 2, &[2], &[0], SubsetAction::Exploring);
    assert_eq!(
        state.to_string(),
        "Exploring index 1\nIndex: 1\nCurrent Sum: 2\nCurrent Subset: [2]"
    );
}

#[test]
fn test_subset_sum_complexity_text() {
    let text = Algorithm::SubsetSum.complexity().to_string();
    assert!(text.starts_with("Complexity Analysis:"));
    assert!(text.contains("Worst Case: O(2^n)"));
    assert_eq!(Algorithm::LasVegas.explanation().len(), 4);
}
