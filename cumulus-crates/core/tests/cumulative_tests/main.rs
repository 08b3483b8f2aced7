mod conflict_tests;
mod scenario_tests;
mod soundness_tests;

use cumulus_core::constraints;
use cumulus_core::engine::BoxedPropagator;
use cumulus_core::variables::DomainId;
use cumulus_core::ConstraintOperationError;
use cumulus_core::CumulativeOptions;
use cumulus_core::CumulativePropagationMethod;
use cumulus_core::TestSolver;

const METHODS: [CumulativePropagationMethod; 3] = [
    CumulativePropagationMethod::TimeTable,
    CumulativePropagationMethod::TimeTableEdgeFinding,
    CumulativePropagationMethod::TimeTableUnaryEdgeFinding,
];

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a cumulative over tasks with the given start domains, fixed durations and fixed
/// resource usages and adds it to a fresh solver.
fn set_up_cumulative_state(
    task_info: &[((i32, i32), i32, i32)],
    capacity: i32,
    propagation_method: CumulativePropagationMethod,
) -> (
    TestSolver,
    Result<BoxedPropagator, ConstraintOperationError>,
    Vec<DomainId>,
) {
    init_logging();
    let mut solver = TestSolver::default();

    let start_times = task_info
        .iter()
        .map(|&((lb, ub), _, _)| solver.new_variable(lb, ub))
        .collect::<Vec<_>>();
    let durations = task_info.iter().map(|&(_, duration, _)| duration);
    let resource_usages = task_info.iter().map(|&(_, _, resource_usage)| resource_usage);

    let propagator = constraints::cumulative_with_options(
        start_times.clone(),
        durations,
        resource_usages,
        capacity,
        CumulativeOptions::new(propagation_method, true, true, true),
    )
    .expect("the arguments have the same length");
    let result = solver.new_propagator(propagator);

    (solver, result, start_times)
}
