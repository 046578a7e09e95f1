//! Tests for the search engines.

use std::collections::BTreeSet;
use std::thread;
use std::time::Duration;

use backtrack_core::{SubsetAction, SubsetSumProblem};
use backtrack_test::{
    assert_prefix_placed, assert_valid_placement, small_subset_problem, subset_sums_brute_force,
    unsolvable_subset_problem,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::backtracking::BacktrackingSearch;
use super::las_vegas::{solve_las_vegas, LasVegasDriver, LasVegasEvent, LasVegasSearch};
use super::subset_sum::SubsetSumSearch;
use super::{SearchEngine, SearchOutcome};
use crate::test_utils::{drain_snapshots, fast_scope, paced_scope, run_to_end};

#[test]
fn test_backtracking_solves_boards_four_to_ten() {
    for n in 4..=10 {
        let mut search = BacktrackingSearch::new(n).unwrap();
        let (report, snapshots) = run_to_end(&mut search);

        assert_eq!(report.outcome, SearchOutcome::Solved, "n = {}", n);
        assert_valid_placement(&report.placement);
        assert!(!snapshots.is_empty());
    }
}

#[test]
fn test_backtracking_single_square() {
    let mut search = BacktrackingSearch::new(1).unwrap();
    let (report, snapshots) = run_to_end(&mut search);

    assert!(report.is_solved());
    assert_eq!(report.placement.to_rows(), Some(vec![0]));
    assert_eq!(snapshots.len(), 1);
}

#[test]
fn test_backtracking_fails_on_two_and_three() {
    for n in [2, 3] {
        let mut search = BacktrackingSearch::new(n).unwrap();
        let (report, _) = run_to_end(&mut search);

        assert_eq!(report.outcome, SearchOutcome::Failed, "n = {}", n);
        assert_eq!(report.placement.placed_count(), 0);
    }
}

#[test]
fn test_backtracking_rejects_empty_board() {
    assert!(BacktrackingSearch::new(0).is_err());
}

#[test]
fn test_backtracking_snapshots_leave_later_columns_unset() {
    let mut search = BacktrackingSearch::new(6).unwrap();
    let (_, snapshots) = run_to_end(&mut search);

    let mut last_step = 0;
    for snapshot in &snapshots {
        assert_prefix_placed(&snapshot.placement, snapshot.column);
        assert_eq!(snapshot.placement.get(snapshot.column), Some(snapshot.row));
        assert!(snapshot.step >= last_step);
        last_step = snapshot.step;
    }
}

#[test]
fn test_backtracking_is_repeatable() {
    let mut search = BacktrackingSearch::new(8).unwrap();
    let (first, _) = run_to_end(&mut search);
    let (second, _) = run_to_end(&mut search);

    assert_eq!(first.placement, second.placement);
    assert_eq!(first.steps, second.steps);
}

#[test]
fn test_backtracking_cancelled_before_start() {
    let (mut scope, mut receiver) = fast_scope();
    receiver.cancel();

    let report = BacktrackingSearch::new(8).unwrap().search(&mut scope);
    drop(scope);

    assert_eq!(report.outcome, SearchOutcome::Cancelled);
    assert!(drain_snapshots(&mut receiver).is_empty());
}

#[test]
fn test_backtracking_cancelled_mid_run() {
    let (mut scope, mut receiver) = paced_scope(Duration::from_millis(2));
    let handle = thread::spawn(move || BacktrackingSearch::new(12).unwrap().search(&mut scope));

    assert!(receiver.blocking_recv().is_some());
    receiver.cancel();

    let report = handle.join().unwrap();
    assert_eq!(report.outcome, SearchOutcome::Cancelled);
    assert!(!report.placement.is_complete());
}

#[test]
fn test_las_vegas_attempt_counts_every_invocation() {
    let mut search = LasVegasSearch::with_seed(3, 1).unwrap();
    let (mut scope, _receiver) = fast_scope();

    for expected in 1..=5 {
        let attempt = search.attempt(&mut scope);
        assert_eq!(attempt.outcome, SearchOutcome::Failed);
        assert_eq!(attempt.attempt, expected);
    }
    assert_eq!(search.attempts(), 5);
    assert_eq!(scope.stats().attempt_count, 5);

    search.reset();
    assert_eq!(search.attempts(), 0);
}

#[test]
fn test_las_vegas_attempt_ends_with_summary_event() {
    let mut search = LasVegasSearch::with_seed(2, 9).unwrap();
    let (report, events) = run_to_end(&mut search);

    assert_eq!(report.outcome, SearchOutcome::Failed);
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], LasVegasEvent::Placed(ref s) if s.column == 0));
    assert_eq!(
        events[1],
        LasVegasEvent::AttemptEnded {
            attempt: 1,
            outcome: SearchOutcome::Failed,
            placed: 1,
        }
    );
}

#[test]
fn test_las_vegas_snapshots_use_safe_rows() {
    let mut search = LasVegasSearch::with_seed(10, 3).unwrap();
    let (mut scope, mut receiver) = fast_scope();
    for _ in 0..20 {
        search.attempt(&mut scope);
    }
    drop(scope);

    for event in drain_snapshots(&mut receiver) {
        if let LasVegasEvent::Placed(snapshot) = event {
            assert_prefix_placed(&snapshot.placement, snapshot.column);
            let rows: Vec<usize> = (0..=snapshot.column)
                .filter_map(|c| snapshot.placement.get(c))
                .collect();
            for a in 0..rows.len() {
                for b in a + 1..rows.len() {
                    assert_ne!(rows[a], rows[b]);
                    assert_ne!(rows[a].abs_diff(rows[b]), b - a);
                }
            }
        }
    }
}

#[test]
fn test_las_vegas_eventually_solves_four_to_ten() {
    for n in 4..=10 {
        let mut search = LasVegasSearch::with_seed(n, 2024).unwrap();
        let (mut scope, _receiver) = fast_scope();

        let report = solve_las_vegas(&mut search, &mut scope, Some(100_000));

        assert_eq!(report.outcome, SearchOutcome::Solved, "n = {}", n);
        assert_valid_placement(&report.placement);
        assert!(report.attempts >= 1);
        assert_eq!(report.attempts, search.attempts());
    }
}

#[test]
fn test_las_vegas_gives_up_at_cap() {
    let mut search = LasVegasSearch::with_seed(3, 5).unwrap();
    let (mut scope, _receiver) = fast_scope();

    let report = solve_las_vegas(&mut search, &mut scope, Some(25));

    assert_eq!(report.outcome, SearchOutcome::Failed);
    assert_eq!(report.attempts, 25);
}

#[test]
fn test_las_vegas_zero_cap_makes_no_attempt() {
    let mut search = LasVegasSearch::with_seed(8, 5).unwrap();
    let (mut scope, mut receiver) = fast_scope();

    let report = solve_las_vegas(&mut search, &mut scope, Some(0));
    drop(scope);

    assert_eq!(report.outcome, SearchOutcome::Failed);
    assert_eq!(report.attempts, 0);
    assert_eq!(report.placement.placed_count(), 0);
    assert_eq!(search.attempts(), 0);
    assert!(drain_snapshots(&mut receiver).is_empty());
}

#[test]
fn test_las_vegas_seeded_runs_match() {
    let run = |seed| {
        let mut driver = LasVegasDriver::new(LasVegasSearch::with_seed(8, seed).unwrap(), None);
        let (report, _) = run_to_end(&mut driver);
        report
    };

    let first = run(77);
    let second = run(77);
    assert_eq!(first.placement, second.placement);
    assert_eq!(first.attempts, second.attempts);
    assert_valid_placement(&first.placement);
}

#[test]
fn test_las_vegas_cancelled_before_start() {
    let (mut scope, receiver) = fast_scope();
    receiver.cancel();

    let mut search = LasVegasSearch::with_seed(8, 1).unwrap();
    let report = solve_las_vegas(&mut search, &mut scope, None);

    assert_eq!(report.outcome, SearchOutcome::Cancelled);
    assert_eq!(report.attempts, 1);
}

#[test]
fn test_las_vegas_cancelled_mid_run() {
    let (mut scope, mut receiver) = paced_scope(Duration::from_millis(2));
    // Size 3 has no solution, so only cancellation ends the uncapped loop.
    let handle = thread::spawn(move || {
        let mut search = LasVegasSearch::with_seed(3, 11).unwrap();
        solve_las_vegas(&mut search, &mut scope, None)
    });

    assert!(receiver.blocking_recv().is_some());
    receiver.cancel();

    let report = handle.join().unwrap();
    assert_eq!(report.outcome, SearchOutcome::Cancelled);
}

#[test]
fn test_subset_sum_finds_both_subsets_of_ten() {
    let mut search = SubsetSumSearch::new(small_subset_problem());
    let (report, _) = run_to_end(&mut search);

    assert_eq!(report.outcome, SearchOutcome::Solved);
    assert_eq!(report.solutions, vec![vec![2, 3, 5], vec![3, 7]]);
}

#[test]
fn test_subset_sum_duplicate_values() {
    let mut search = SubsetSumSearch::new(SubsetSumProblem::new(vec![1, 1], 2));
    let (report, _) = run_to_end(&mut search);

    assert_eq!(report.solutions, vec![vec![1, 1]]);
}

#[test]
fn test_subset_sum_without_solution_fails() {
    let mut search = SubsetSumSearch::new(unsolvable_subset_problem());
    let (report, _) = run_to_end(&mut search);

    assert_eq!(report.outcome, SearchOutcome::Failed);
    assert!(report.solutions.is_empty());
    assert!(!report.history.is_empty());
}

#[test]
fn test_subset_sum_skips_overflowing_include() {
    let mut search = SubsetSumSearch::new(SubsetSumProblem::new(vec![i64::MAX - 1, 5], i64::MAX));
    let (report, states) = run_to_end(&mut search);

    assert_eq!(report.outcome, SearchOutcome::Failed);
    assert!(report.solutions.is_empty());
    assert_eq!(states.len(), report.history.len());
    assert!(states.iter().all(|s| s.sum >= 0));
    assert!(states
        .iter()
        .any(|s| s.index == 1 && s.sum == i64::MAX - 1 && s.action == SubsetAction::Backtracking));
}

#[test]
fn test_subset_sum_overflow_does_not_hide_other_solutions() {
    let mut search = SubsetSumSearch::new(SubsetSumProblem::new(vec![4, i64::MAX, 1], 5));
    let (report, _) = run_to_end(&mut search);

    assert_eq!(report.outcome, SearchOutcome::Solved);
    assert_eq!(report.solutions, vec![vec![4, 1]]);
}

#[test]
fn test_subset_sum_history_matches_snapshots() {
    let mut search = SubsetSumSearch::new(small_subset_problem());
    let (report, snapshots) = run_to_end(&mut search);

    assert_eq!(report.history.len(), snapshots.len());
    assert!(report.history.iter().eq(snapshots.iter()));
    assert_eq!(
        report.history.at(0).map(|s| s.action),
        Some(SubsetAction::Exploring)
    );
}

#[test]
fn test_subset_sum_states_keep_sum_consistent() {
    let mut search = SubsetSumSearch::new(small_subset_problem());
    let (report, _) = run_to_end(&mut search);

    let numbers = small_subset_problem();
    for state in &report.history {
        assert_eq!(state.sum, state.values.iter().sum::<i64>(), "{}", state);
        assert_eq!(state.values.len(), state.indices.len());
        for (value, &index) in state.values.iter().zip(&state.indices) {
            assert_eq!(numbers.numbers()[index], *value);
        }
    }

    let found = report
        .history
        .iter()
        .filter(|s| s.action == SubsetAction::SolutionFound)
        .count();
    assert_eq!(found, report.solutions.len());
}

#[test]
fn test_subset_sum_matches_brute_force() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..20 {
        let count = rng.random_range(1..=10);
        let target = rng.random_range(1..=30);
        // Distinct values so position-wise solutions are distinct lists.
        let mut numbers: Vec<i64> = (1..=20).collect();
        for i in 0..count {
            let j = rng.random_range(i..numbers.len());
            numbers.swap(i, j);
        }
        numbers.truncate(count);
        let problem = SubsetSumProblem::new(numbers, target);

        let mut search = SubsetSumSearch::new(problem.clone());
        let (report, _) = run_to_end(&mut search);

        let found: BTreeSet<Vec<i64>> = report.solutions.iter().cloned().collect();
        assert_eq!(found.len(), report.solutions.len());
        assert_eq!(found, subset_sums_brute_force(&problem), "{:?}", problem);
    }
}

#[test]
fn test_subset_sum_replay_walks_history() {
    let mut search = SubsetSumSearch::new(small_subset_problem());
    let (mut report, _) = run_to_end(&mut search);
    let len = report.history.len();

    let mut moves = 0;
    while report.history.forward().state().is_some() {
        moves += 1;
    }
    assert_eq!(moves, len - 1);
    assert_eq!(report.history.cursor(), len - 1);

    while report.history.backward().state().is_some() {}
    assert_eq!(report.history.cursor(), 0);
}

#[test]
fn test_subset_sum_cancelled_before_start() {
    let (mut scope, receiver) = fast_scope();
    receiver.cancel();

    let report = SubsetSumSearch::new(small_subset_problem()).search(&mut scope);

    assert_eq!(report.outcome, SearchOutcome::Cancelled);
    assert!(report.history.is_empty());
}

#[test]
fn test_subset_sum_cancelled_after_first_state() {
    let (mut scope, mut receiver) = fast_scope();
    // Never overshoots, so an uncancelled run would walk all 2^30 leaves.
    let problem = SubsetSumProblem::new((1..=30).collect(), 10_000);
    let handle = thread::spawn(move || SubsetSumSearch::new(problem).search(&mut scope));

    assert!(receiver.blocking_recv().is_some());
    receiver.cancel();

    let report = handle.join().unwrap();
    assert_eq!(report.outcome, SearchOutcome::Cancelled);
    assert!(!report.history.is_empty());
}

#[test]
fn test_report_summaries() {
    let mut search = SubsetSumSearch::new(small_subset_problem());
    let (report, _) = run_to_end(&mut search);
    let text = report.to_string();
    assert!(text.starts_with("Found 2 solutions in "));
    assert!(text.contains("\n1. [2, 3, 5]"));
    assert!(text.contains("\n2. [3, 7]"));

    let mut search = BacktrackingSearch::new(4).unwrap();
    let (report, _) = run_to_end(&mut search);
    assert!(report.to_string().starts_with("Backtracking solved in "));
}
