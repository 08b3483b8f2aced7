use crate::set_up_cumulative_state;
use crate::METHODS;

fn assert_conflict(task_info: &[((i32, i32), i32, i32)], capacity: i32) {
    for method in METHODS {
        let (_, result, _) = set_up_cumulative_state(task_info, capacity, method);
        assert!(
            result.is_err(),
            "Expected an error to occur with {method:?} but was {result:?}"
        );
    }
}

#[test]
fn cumulative_time_table_conflict_0() {
    assert_conflict(&[((42, 50), 10, 10), ((45, 50), 7, 10)], 19);
}

#[test]
fn cumulative_time_table_conflict_1() {
    assert_conflict(
        &[((34, 43), 10, 10), ((34, 43), 10, 7), ((34, 43), 10, 4)],
        19,
    );
}

#[test]
fn cumulative_time_table_conflict_2() {
    assert_conflict(
        &[((31, 38), 10, 7), ((32, 38), 9, 9), ((31, 38), 10, 4)],
        19,
    );
}

#[test]
fn cumulative_time_table_conflict_3() {
    assert_conflict(
        &[((41, 46), 10, 8), ((42, 46), 9, 3), ((44, 46), 7, 6)],
        14,
    );
}

#[test]
fn cumulative_time_table_conflict_4() {
    assert_conflict(&[((28, 30), 3, 10), ((27, 30), 4, 10)], 14);
}

#[test]
fn cumulative_energy_conflict_without_mandatory_parts() {
    // Three tasks of length 2 cannot be processed in a window of length 5 on a unary resource,
    // even though none of them has a mandatory part
    let (_, result, _) = set_up_cumulative_state(
        &[((0, 3), 2, 1), ((0, 3), 2, 1), ((0, 3), 2, 1)],
        1,
        cumulus_core::CumulativePropagationMethod::TimeTableEdgeFinding,
    );
    assert!(result.is_err());

    let (_, result, _) = set_up_cumulative_state(
        &[((0, 3), 2, 1), ((0, 3), 2, 1), ((0, 3), 2, 1)],
        1,
        cumulus_core::CumulativePropagationMethod::TimeTableUnaryEdgeFinding,
    );
    assert!(result.is_err());
}
