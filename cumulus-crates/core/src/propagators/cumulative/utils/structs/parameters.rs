use super::ArgTask;
use super::Task;
use crate::engine::propagation::LocalId;
use crate::propagators::CumulativePropagatorOptions;

/// Holds the data for the cumulative constraint; more specifically it holds:
/// - The tasks
/// - The capacity of the resource
/// - The options for propagating the cumulative constraint
#[derive(Debug, Clone)]
pub(crate) struct CumulativeParameters<Var, PVar, RVar, CVar> {
    /// The Set of [`Task`]s; for each [`Task`], the [`Task::id`] is assumed to correspond to its
    /// index in this slice
    pub(crate) tasks: Box<[Task<Var, PVar, RVar>]>,
    /// The capacity of the resource (i.e. how much resource consumption can be maximally
    /// accomodated at each time point)
    pub(crate) capacity: CVar,
    /// The [`CumulativePropagatorOptions`] which influence the behaviour of the cumulative
    /// propagator.
    pub(crate) options: CumulativePropagatorOptions,
}

impl<Var: Clone, PVar: Clone, RVar: Clone, CVar> CumulativeParameters<Var, PVar, RVar, CVar> {
    pub(crate) fn new(
        arg_tasks: &[ArgTask<Var, PVar, RVar>],
        capacity: CVar,
        options: CumulativePropagatorOptions,
    ) -> CumulativeParameters<Var, PVar, RVar, CVar> {
        let tasks = arg_tasks
            .iter()
            .enumerate()
            .map(|(index, arg_task)| Task {
                start_variable: arg_task.start_time.clone(),
                processing_time: arg_task.processing_time.clone(),
                resource_usage: arg_task.resource_usage.clone(),
                presence: arg_task.presence.clone(),
                id: LocalId::from(index as u32),
            })
            .collect::<Vec<_>>()
            .into_boxed_slice();

        CumulativeParameters {
            tasks,
            capacity,
            options,
        }
    }
}
