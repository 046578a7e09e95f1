//! End-to-end tests: manager, consumer loop, cancellation and replay.

use std::ops::ControlFlow;
use std::time::Duration;

use backtrack::prelude::*;
use backtrack::{drive, BacktrackError, LasVegasEvent, SearchStatus, SubsetAction};
use backtrack_test::{
    assert_valid_placement, fast_config, placement_from_rows, small_subset_problem,
};

#[test]
fn test_solve_queens_blocking() {
    let report = backtrack::solve_queens(8).unwrap();
    assert_eq!(report.outcome, SearchOutcome::Solved);
    assert_valid_placement(&report.placement);

    let four = backtrack::solve_queens(4).unwrap();
    assert_eq!(four.placement, placement_from_rows(&[1, 3, 0, 2]));

    assert!(matches!(
        backtrack::solve_queens(0),
        Err(BacktrackError::InvalidBoardSize(0))
    ));
}

#[test]
fn test_consumer_sees_every_backtracking_snapshot() {
    let manager = SearchManager::new(fast_config());
    let mut seen = Vec::new();

    let report = drive(manager.start_backtracking(6).unwrap(), |snapshot| {
        seen.push(snapshot.clone());
        ControlFlow::Continue(())
    })
    .unwrap();

    assert!(report.is_solved());
    let last = seen.last().unwrap();
    assert_eq!(last.placement, report.placement);
    assert_eq!(last.status(), "Placing queen 6/6");
}

#[test]
fn test_consumer_cancels_after_ten_steps() {
    let manager = SearchManager::new(fast_config().with_step_delay(Duration::from_millis(5)));
    let mut count = 0;

    let report = drive(manager.start_backtracking(14).unwrap(), |_| {
        count += 1;
        if count == 10 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
    .unwrap();

    assert_eq!(report.outcome, SearchOutcome::Cancelled);
    assert_eq!(count, 10);
    assert_eq!(manager.status(), SearchStatus::Idle);
}

#[test]
fn test_las_vegas_stream_ends_with_solved_attempt() {
    let manager = SearchManager::new(fast_config());
    let mut last_event = None;

    let report = drive(manager.start_las_vegas(8).unwrap(), |event| {
        last_event = Some(event.clone());
        ControlFlow::Continue(())
    })
    .unwrap();

    assert!(report.is_solved());
    assert_valid_placement(&report.placement);
    match last_event {
        Some(LasVegasEvent::AttemptEnded {
            attempt, outcome, ..
        }) => {
            assert_eq!(attempt, report.attempts);
            assert_eq!(outcome, SearchOutcome::Solved);
        }
        other => panic!("unexpected last event: {:?}", other),
    }
    assert_eq!(manager.session().total_attempts, report.attempts);
}

#[test]
fn test_subset_sum_then_replay() {
    let manager = SearchManager::new(fast_config());
    let streamed = {
        let mut states = Vec::new();
        drive(manager.start_subset_sum(small_subset_problem()).unwrap(), |state| {
            states.push(state.clone());
            ControlFlow::Continue(())
        })
        .unwrap();
        states
    };

    let mut history = manager.replay().unwrap();
    assert_eq!(history.len(), streamed.len());
    assert_eq!(history.current(), streamed.first());

    let mut replayed = vec![history.current().cloned().unwrap()];
    while let ReplayMove::Moved(state) = history.forward() {
        replayed.push(state.clone());
    }
    assert_eq!(replayed, streamed);
    assert_eq!(history.forward().boundary_message(), Some("Reached end of history"));

    let solutions: Vec<&SubsetSumState> = replayed
        .iter()
        .filter(|s| s.action == SubsetAction::SolutionFound)
        .collect();
    assert_eq!(solutions.len(), 2);
    assert!(solutions.iter().all(|s| s.sum == 10));
}

#[test]
fn test_reset_between_searches() {
    let manager = SearchManager::new(fast_config());
    manager.start_subset_sum(small_subset_problem()).unwrap().join().unwrap();
    manager.reset().unwrap();

    assert!(matches!(manager.replay(), Err(BacktrackError::NoCompletedRun)));
    let report = manager.start_backtracking(4).unwrap().join().unwrap();
    assert!(report.is_solved());
}

#[test]
fn test_config_from_toml_drives_manager() {
    let config = SearchConfig::from_toml_str(
        r#"
        random_seed = 5

        [pacing]
        step_delay_ms = 0

        [las_vegas]
        max_attempts = 3
        "#,
    )
    .unwrap();
    let manager = SearchManager::new(config);

    let report = manager.start_las_vegas(3).unwrap().join().unwrap();
    assert_eq!(report.outcome, SearchOutcome::Failed);
    assert_eq!(report.attempts, 3);
}
