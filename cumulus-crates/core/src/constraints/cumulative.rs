use crate::basic_types::ConstructionError;
use crate::engine::variables::IntegerVariable;
use crate::propagators::ArgTask;
use crate::propagators::CumulativeOptions;
use crate::propagators::CumulativePropagationMethod;
use crate::propagators::CumulativePropagator;

/// Creates the [Cumulative](https://sofdem.github.io/gccat/gccat/Ccumulative.html) constraint.
///
/// This constraint ensures that at no point in time, the cumulative resource usage of the tasks
/// which are running exceeds `resource_capacity`; a task `i` runs during
/// `[start_times[i], start_times[i] + durations[i])`.
///
/// The propagator applies time-table reasoning followed by the capacitated edge-finding of
/// Vilím \[1\]; a different method can be selected with [`cumulative_with_options`].
///
/// The number of `start_times`, `durations` and `resource_requirements` should be the same; if
/// this is not the case then a [`ConstructionError::LengthMismatch`] is returned.
///
/// # Example
/// ```rust
/// // We construct three tasks for a resource with capacity 2:
/// // - Task 0: Start times: [0, 2], Processing time: 2, Resource usage: 2
/// // - Task 1: Start times: [0, 2], Processing time: 2, Resource usage: 2
/// // - Task 2: Start times: [0, 10], Processing time: 2, Resource usage: 1
/// // Task 0 and Task 1 fill the resource until time 4, hence Task 2 has to start after them.
/// # use cumulus_core::constraints;
/// # use cumulus_core::TestSolver;
/// let mut solver = TestSolver::default();
///
/// let start_0 = solver.new_variable(0, 2);
/// let start_1 = solver.new_variable(0, 2);
/// let start_2 = solver.new_variable(0, 10);
///
/// let propagator = constraints::cumulative([start_0, start_1, start_2], [2, 2, 2], [2, 2, 1], 2)
///     .expect("the arguments have the same length");
/// let _ = solver
///     .new_propagator(propagator)
///     .expect("the tasks can be scheduled");
///
/// assert_eq!(solver.lower_bound(start_2), 4);
/// ```
///
/// # Bibliography
/// \[1\] P. Vilím, ‘Edge Finding Filtering Algorithm for Discrete Cumulative Resources in
/// O(kn log n)’, in Principles and Practice of Constraint Programming - CP 2009, 2009,
/// pp. 802–816.
pub fn cumulative<
    Var: IntegerVariable + 'static,
    PVar: IntegerVariable + 'static,
    RVar: IntegerVariable + 'static,
    CVar: IntegerVariable + 'static,
>(
    start_times: impl IntoIterator<Item = Var>,
    durations: impl IntoIterator<Item = PVar>,
    resource_requirements: impl IntoIterator<Item = RVar>,
    resource_capacity: CVar,
) -> Result<CumulativePropagator<Var, PVar, RVar, CVar>, ConstructionError> {
    cumulative_with_options(
        start_times,
        durations,
        resource_requirements,
        resource_capacity,
        CumulativeOptions::default(),
    )
}

/// Creates the [Cumulative](https://sofdem.github.io/gccat/gccat/Ccumulative.html) constraint
/// with the provided [`CumulativeOptions`].
///
/// See the documentation of [`cumulative`] for more information about the constraint.
pub fn cumulative_with_options<
    Var: IntegerVariable + 'static,
    PVar: IntegerVariable + 'static,
    RVar: IntegerVariable + 'static,
    CVar: IntegerVariable + 'static,
>(
    start_times: impl IntoIterator<Item = Var>,
    durations: impl IntoIterator<Item = PVar>,
    resource_requirements: impl IntoIterator<Item = RVar>,
    resource_capacity: CVar,
    options: CumulativeOptions,
) -> Result<CumulativePropagator<Var, PVar, RVar, CVar>, ConstructionError> {
    let tasks = create_tasks(start_times, durations, resource_requirements)?;

    Ok(CumulativePropagator::new(
        &tasks,
        resource_capacity,
        options,
    ))
}

/// Creates the [Cumulative](https://sofdem.github.io/gccat/gccat/Ccumulative.html) constraint
/// over optional tasks; task `i` only uses the resource if `presences[i]` is 1.
///
/// The presence variables should have a domain which is a subset of `{0, 1}`. Whenever a task
/// cannot be placed anywhere in its time window without overloading the resource, its presence
/// is set to 0.
///
/// See the documentation of [`cumulative`] for more information about the constraint.
pub fn cumulative_optional<
    Var: IntegerVariable + 'static,
    PVar: IntegerVariable + 'static,
    RVar: IntegerVariable + 'static,
    CVar: IntegerVariable + 'static,
>(
    start_times: impl IntoIterator<Item = Var>,
    durations: impl IntoIterator<Item = PVar>,
    resource_requirements: impl IntoIterator<Item = RVar>,
    presences: impl IntoIterator<Item = Var>,
    resource_capacity: CVar,
    options: CumulativeOptions,
) -> Result<CumulativePropagator<Var, PVar, RVar, CVar>, ConstructionError> {
    let mut tasks = create_tasks(start_times, durations, resource_requirements)?;

    let presences = presences.into_iter().collect::<Vec<_>>();
    if presences.len() != tasks.len() {
        return Err(ConstructionError::PresenceLengthMismatch {
            tasks: tasks.len(),
            presences: presences.len(),
        });
    }

    for (task, presence) in tasks.iter_mut().zip(presences) {
        task.presence = Some(presence);
    }

    Ok(CumulativePropagator::new(
        &tasks,
        resource_capacity,
        options,
    ))
}

/// Creates a constraint which ensures that none of the tasks overlap; task `i` runs during
/// `[start_times[i], start_times[i] + durations[i])`.
///
/// This is a [`cumulative`] with a resource usage of 1 for every task and a capacity of 1, which
/// is propagated with time-table reasoning followed by the unary rules of Vilím \[1\] (overload
/// checking, detectable precedences, not-first/not-last and edge-finding).
///
/// # Bibliography
/// \[1\] P. Vilím, ‘Filtering algorithms for the unary resource constraint’, Archives of Control
/// Sciences, vol. 18, no. 2, pp. 159–202, 2008.
pub fn unary<Var: IntegerVariable + 'static, PVar: IntegerVariable + 'static>(
    start_times: impl IntoIterator<Item = Var>,
    durations: impl IntoIterator<Item = PVar>,
) -> Result<CumulativePropagator<Var, PVar, i32, i32>, ConstructionError> {
    let start_times = start_times.into_iter().collect::<Vec<_>>();
    let resource_requirements = vec![1; start_times.len()];

    cumulative_with_options(
        start_times,
        durations,
        resource_requirements,
        1,
        CumulativeOptions::new(
            CumulativePropagationMethod::TimeTableUnaryEdgeFinding,
            true,
            true,
            true,
        ),
    )
}

fn create_tasks<
    Var: IntegerVariable + 'static,
    PVar: IntegerVariable + 'static,
    RVar: IntegerVariable + 'static,
>(
    start_times: impl IntoIterator<Item = Var>,
    durations: impl IntoIterator<Item = PVar>,
    resource_requirements: impl IntoIterator<Item = RVar>,
) -> Result<Vec<ArgTask<Var, PVar, RVar>>, ConstructionError> {
    let start_times = start_times.into_iter().collect::<Vec<_>>();
    let durations = durations.into_iter().collect::<Vec<_>>();
    let resource_requirements = resource_requirements.into_iter().collect::<Vec<_>>();

    if start_times.len() != durations.len() || start_times.len() != resource_requirements.len() {
        return Err(ConstructionError::LengthMismatch {
            starts: start_times.len(),
            durations: durations.len(),
            resource_usages: resource_requirements.len(),
        });
    }

    Ok(start_times
        .into_iter()
        .zip(durations)
        .zip(resource_requirements)
        .map(
            |((start_time, processing_time), resource_usage)| ArgTask {
                start_time,
                processing_time,
                resource_usage,
                presence: None,
            },
        )
        .collect())
}
