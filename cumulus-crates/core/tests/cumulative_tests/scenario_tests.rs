use cumulus_core::constraints;
use cumulus_core::ConflictReason;
use cumulus_core::ConstraintOperationError;
use cumulus_core::CumulativeOptions;
use cumulus_core::CumulativePropagationMethod;
use cumulus_core::Inconsistency;
use cumulus_core::PropagatorConflict;
use cumulus_core::TestSolver;

use crate::init_logging;
use crate::set_up_cumulative_state;
use crate::METHODS;

#[test]
fn unary_tasks_are_pushed_apart_once_placed() {
    for method in METHODS {
        let (mut solver, result, starts) =
            set_up_cumulative_state(&[((0, 10), 2, 1), ((0, 10), 2, 1), ((0, 10), 2, 1)], 1, method);
        let mut propagator = result.expect("No conflict");

        solver.set_upper_bound(starts[0], 0).expect("non-empty");
        solver.propagate(&mut propagator).expect("No conflict");
        assert_eq!(solver.lower_bound(starts[1]), 2);
        assert_eq!(solver.lower_bound(starts[2]), 2);

        solver.set_upper_bound(starts[1], 2).expect("non-empty");
        solver.propagate(&mut propagator).expect("No conflict");
        assert_eq!(solver.lower_bound(starts[2]), 4);

        solver.set_upper_bound(starts[2], 4).expect("non-empty");
        solver.propagate(&mut propagator).expect("No conflict");
        for (index, &start) in starts.iter().enumerate() {
            assert_eq!(solver.lower_bound(start), 2 * index as i32);
            assert_eq!(solver.upper_bound(start), 2 * index as i32);
        }
    }
}

#[test]
fn overloaded_mandatory_parts_are_a_conflict() {
    init_logging();
    let mut solver = TestSolver::default();
    let a = solver.new_variable(0, 0);
    let b = solver.new_variable(0, 0);
    let limit = solver.new_variable(0, 5);

    let propagator = constraints::cumulative([a, b], [5, 5], [3, 3], limit).expect("same lengths");
    let result = solver.new_propagator(propagator);

    assert!(matches!(
        result,
        Err(ConstraintOperationError::InfeasiblePropagator(
            Inconsistency::Conflict(PropagatorConflict {
                reason: ConflictReason::ResourceOverload {
                    usage: 6,
                    capacity: 5,
                    ..
                },
                ..
            })
        ))
    ));
}

#[test]
fn optional_task_in_saturated_window_is_made_absent() {
    init_logging();
    let mut solver = TestSolver::default();
    let saturating = solver.new_variable(0, 0);
    let optional = solver.new_variable(2, 5);
    let always_present = solver.new_variable(1, 1);
    let presence = solver.new_variable(0, 1);
    let limit = solver.new_variable(4, 4);

    let propagator = constraints::cumulative_optional(
        [saturating, optional],
        [10, 3],
        [4, 5],
        [always_present, presence],
        limit,
        CumulativeOptions::default(),
    )
    .expect("same lengths");
    let _ = solver.new_propagator(propagator).expect("No conflict");

    assert_eq!(solver.upper_bound(presence), 0);
    // The start time of an absent task is not constrained
    assert_eq!(solver.lower_bound(optional), 2);
    assert_eq!(solver.upper_bound(optional), 5);
}

#[test]
fn optional_task_which_fits_stays_optional() {
    init_logging();
    let mut solver = TestSolver::default();
    let saturating = solver.new_variable(0, 0);
    let optional = solver.new_variable(2, 12);
    let always_present = solver.new_variable(1, 1);
    let presence = solver.new_variable(0, 1);

    let propagator = constraints::cumulative_optional(
        [saturating, optional],
        [10, 3],
        [4, 4],
        [always_present, presence],
        4,
        CumulativeOptions::default(),
    )
    .expect("same lengths");
    let _ = solver.new_propagator(propagator).expect("No conflict");

    assert_eq!(solver.lower_bound(presence), 0);
    assert_eq!(solver.upper_bound(presence), 1);
    assert_eq!(solver.lower_bound(optional), 2);
}

/// Mirrors the start domain `[lb, ub]` of a task with the given duration around time 0.
fn mirror(bounds: (i32, i32), duration: i32) -> (i32, i32) {
    (-bounds.1 - duration, -bounds.0 - duration)
}

fn propagated_bounds(
    task_info: &[((i32, i32), i32, i32)],
    capacity: i32,
    method: CumulativePropagationMethod,
) -> Vec<(i32, i32)> {
    let (solver, result, starts) = set_up_cumulative_state(task_info, capacity, method);
    let _ = result.expect("No conflict");
    starts
        .iter()
        .map(|&start| (solver.lower_bound(start), solver.upper_bound(start)))
        .collect()
}

fn assert_mirrored_propagation_is_symmetric(
    task_info: &[((i32, i32), i32, i32)],
    capacity: i32,
    method: CumulativePropagationMethod,
) {
    let mirrored_task_info = task_info
        .iter()
        .map(|&(bounds, duration, resource_usage)| {
            (mirror(bounds, duration), duration, resource_usage)
        })
        .collect::<Vec<_>>();

    let bounds = propagated_bounds(task_info, capacity, method);
    let mirrored_bounds = propagated_bounds(&mirrored_task_info, capacity, method);

    for ((bounds, mirrored_bounds), &(_, duration, _)) in
        bounds.iter().zip(mirrored_bounds).zip(task_info)
    {
        assert_eq!(*bounds, mirror(mirrored_bounds, duration));
    }
}

#[test]
fn time_table_tightens_latest_start_symmetrically() {
    let task_info = [((5, 5), 3, 1), ((0, 7), 2, 1)];
    assert_eq!(
        propagated_bounds(&task_info, 1, CumulativePropagationMethod::TimeTable)[1],
        (0, 3)
    );

    assert_mirrored_propagation_is_symmetric(
        &task_info,
        1,
        CumulativePropagationMethod::TimeTable,
    );
}

#[test]
fn edge_finding_tightens_latest_start_symmetrically() {
    let task_info = [((0, 2), 2, 2), ((0, 2), 2, 2), ((0, 10), 2, 1)];
    assert_eq!(
        propagated_bounds(
            &task_info,
            2,
            CumulativePropagationMethod::TimeTableEdgeFinding
        )[2],
        (4, 10)
    );

    assert_mirrored_propagation_is_symmetric(
        &task_info,
        2,
        CumulativePropagationMethod::TimeTableEdgeFinding,
    );
}

#[test]
fn unary_edge_finding_tightens_latest_start_symmetrically() {
    // The first two tasks have to be processed in [0, 4) which leaves no room for the last task
    let task_info = [((0, 2), 2, 1), ((0, 2), 2, 1), ((0, 10), 2, 1)];
    assert_eq!(
        propagated_bounds(
            &task_info,
            1,
            CumulativePropagationMethod::TimeTableUnaryEdgeFinding
        )[2],
        (4, 10)
    );

    assert_mirrored_propagation_is_symmetric(
        &task_info,
        1,
        CumulativePropagationMethod::TimeTableUnaryEdgeFinding,
    );
}
