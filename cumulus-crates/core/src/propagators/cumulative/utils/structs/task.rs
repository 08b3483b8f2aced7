use std::fmt::Debug;

use crate::engine::propagation::LocalId;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// Structure which stores the variables related to a task; the start time, the processing time
/// and the resource usage of a task can all be variable.
#[derive(Debug, Clone)]
pub(crate) struct Task<Var, PVar, RVar> {
    /// The variable representing the start time of a task
    pub(crate) start_variable: Var,
    /// The processing time of the `start_variable` (also referred to as duration of a task)
    pub(crate) processing_time: PVar,
    /// How much of the resource the given task uses during its non-preemptive execution
    pub(crate) resource_usage: RVar,
    /// A 0-1 variable which is 1 if the task is executed; [`None`] for tasks which are always
    /// executed
    pub(crate) presence: Option<Var>,
    /// The [`LocalId`] of the task
    pub(crate) id: LocalId,
}

impl<
        Var: IntegerVariable + 'static,
        PVar: IntegerVariable + 'static,
        RVar: IntegerVariable + 'static,
    > Task<Var, PVar, RVar>
{
    /// Returns true if the task is known to be executed.
    pub(crate) fn is_present(&self, context: &impl ReadDomains) -> bool {
        self.presence
            .as_ref()
            .is_none_or(|presence| context.lower_bound(presence) != 0)
    }

    /// Returns true if the task is known not to be executed.
    pub(crate) fn is_absent(&self, context: &impl ReadDomains) -> bool {
        self.presence
            .as_ref()
            .is_some_and(|presence| context.upper_bound(presence) == 0)
    }

    /// Returns true if the task may or may not be executed.
    pub(crate) fn is_optional(&self, context: &impl ReadDomains) -> bool {
        !self.is_present(context) && !self.is_absent(context)
    }

    /// Returns true if the task certainly occupies the resource for a non-zero amount of time
    /// once it is executed.
    pub(crate) fn exists(&self, context: &impl ReadDomains) -> bool {
        context.lower_bound(&self.processing_time) > 0
            && context.lower_bound(&self.resource_usage) > 0
    }

    /// Returns true if the task might still occupy the resource.
    pub(crate) fn may_use_resource(&self, context: &impl ReadDomains) -> bool {
        !self.is_absent(context)
            && context.upper_bound(&self.processing_time) > 0
            && context.upper_bound(&self.resource_usage) > 0
    }

    pub(crate) fn est(&self, context: &impl ReadDomains) -> i32 {
        context.lower_bound(&self.start_variable)
    }

    pub(crate) fn lst(&self, context: &impl ReadDomains) -> i32 {
        context.upper_bound(&self.start_variable)
    }

    pub(crate) fn ect(&self, context: &impl ReadDomains) -> i32 {
        context.lower_bound(&self.start_variable) + context.lower_bound(&self.processing_time)
    }

    pub(crate) fn lct(&self, context: &impl ReadDomains) -> i32 {
        context.upper_bound(&self.start_variable) + context.upper_bound(&self.processing_time)
    }

    /// The minimal energy of the task, i.e. its minimal processing time multiplied by its
    /// minimal resource usage.
    pub(crate) fn energy(&self, context: &impl ReadDomains) -> i64 {
        context.lower_bound(&self.processing_time) as i64
            * context.lower_bound(&self.resource_usage) as i64
    }
}

/// The task which is passed as argument
#[derive(Clone, Debug)]
pub struct ArgTask<Var, PVar, RVar> {
    /// The [`IntegerVariable`] representing the start time of a task
    pub start_time: Var,
    /// The processing time of the [`start_time`][ArgTask::start_time] (also referred to as
    /// duration of a task)
    pub processing_time: PVar,
    /// How much of the resource the given task uses during its non-preemptive execution
    pub resource_usage: RVar,
    /// The 0-1 variable indicating whether the task is executed; [`None`] if the task is always
    /// executed
    pub presence: Option<Var>,
}
