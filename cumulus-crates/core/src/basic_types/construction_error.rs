use thiserror::Error;

/// Errors which are raised when a resource constraint is created with malformed arguments.
///
/// These are not recoverable; the model which contains the constraint should be rejected.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    #[error(
        "the number of start times ({starts}), durations ({durations}) and resource usages \
         ({resource_usages}) should be equal"
    )]
    LengthMismatch {
        starts: usize,
        durations: usize,
        resource_usages: usize,
    },
    #[error("{presences} presence variables were provided for {tasks} tasks")]
    PresenceLengthMismatch { tasks: usize, presences: usize },
    #[error("the duration of task {task} has a negative lower-bound")]
    NegativeDuration { task: usize },
    #[error("the resource usage of task {task} has a negative lower-bound")]
    NegativeResourceUsage { task: usize },
    #[error("the resource limit has a negative lower-bound")]
    NegativeCapacity,
    #[error("the presence of task {task} is not restricted to {{0, 1}}")]
    PresenceNotBoolean { task: usize },
    #[error("the time window of task {task} cannot be represented in both time directions")]
    TimeOverflow { task: usize },
    #[error("the energy of the tasks cannot be represented for the given resource limit")]
    EnergyOverflow,
}
