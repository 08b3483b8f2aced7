use log::trace;

use crate::basic_types::ConflictReason;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagatorConflict;
use crate::cumulus_assert_extreme;
use crate::cumulus_assert_moderate;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;
use crate::engine::EmptyDomain;
use crate::propagators::cumulative::push_or_merge_profile;
use crate::propagators::cumulative::CumulativeParameters;
use crate::propagators::cumulative::ResourceProfile;
use crate::propagators::cumulative::Task;
use crate::propagators::CumulativePropagatorOptions;

/// The type of the time-table which is created by the sweep.
///
/// The [`ResourceProfile`]s are sorted based on start time and they are non-overlapping; adjacent
/// profiles have different heights and time points which are not covered have height 0.
pub(crate) type TimeTable = Vec<ResourceProfile>;

/// The kinds of [`Event`]s; the order of the variants is the order in which simultaneous events
/// are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EventKind {
    /// The start or end of a mandatory part
    Profile,
    /// The end of the window `[est, lct)` in which a task is considered for pruning
    PruneClose,
    /// The start of the window `[est, lct)` in which a task is considered for pruning
    PruneOpen,
}

#[derive(Debug, Clone, Copy)]
struct Event {
    /// The time-point at which the [`Event`] took place
    time_stamp: i32,
    kind: EventKind,
    /// The index of the task which caused the event
    task: usize,
    /// Change in resource usage at [time_stamp][Event::time_stamp], positive if it is the start
    /// of a mandatory part and negative if it is the end; 0 for the pruning events
    change_in_resource_usage: i64,
}

/// The bounds of a task at the start of the sweep together with the state of the task during the
/// sweep.
#[derive(Debug, Clone)]
struct SweepTask {
    /// The minimal processing time
    duration: i32,
    /// The minimal resource usage
    resource_usage: i32,
    /// Whether the mandatory part of the task is part of the current profile
    contributes_to_profile: bool,
    /// The start of the run of time points (if any) in which the task does not fit, which is
    /// still being extended
    open_run: Option<i32>,
    /// The closed runs of time points (inclusive) during which the task does not fit, in
    /// chronological order
    conflicting_runs: Vec<(i32, i32)>,
}

/// The set of tasks whose pruning window contains the current time point; supports constant
/// time insertion and removal.
#[derive(Debug, Default)]
struct Candidates {
    tasks: Vec<usize>,
    positions: Vec<Option<usize>>,
}

impl Candidates {
    fn new(number_of_tasks: usize) -> Self {
        Candidates {
            tasks: Vec::new(),
            positions: vec![None; number_of_tasks],
        }
    }

    fn insert(&mut self, task: usize) {
        cumulus_assert_moderate!(self.positions[task].is_none());
        self.positions[task] = Some(self.tasks.len());
        self.tasks.push(task);
    }

    fn remove(&mut self, task: usize) {
        if let Some(position) = self.positions[task].take() {
            let _ = self.tasks.swap_remove(position);
            if let Some(&moved) = self.tasks.get(position) {
                self.positions[moved] = Some(position);
            }
        }
    }
}

/// Performs a single sweep over the time axis which builds the time-table of the mandatory parts
/// of the present tasks and, at the same time, prunes the tasks which overlap the time-table:
/// - the start times at which a task would overload the resource are removed;
/// - the maximal resource usage of a task is lowered to what is left of the capacity during its
///   mandatory part (if [`CumulativePropagatorOptions::prune_resource_usages`] is set);
/// - the maximal processing time of a task is lowered to the longest stretch during which it fits
///   (if [`CumulativePropagatorOptions::prune_durations`] is set).
///
/// The lower-bound of the capacity is raised to the height of every profile. If a profile
/// exceeds the upper-bound of the capacity then an [`Inconsistency`] is returned.
///
/// See Sections 4.2.1 and 4.5.2 of \[1\] for more information about time-table reasoning and
/// \[2\] for the sweep over the time axis.
///
/// # Bibliography
/// \[1\] A. Schutt, Improving scheduling by learning. University of Melbourne, Department of
/// Computer Science and Software Engineering, 2011.
///
/// \[2\] A. Letort, N. Beldiceanu, and M. Carlsson, ‘A scalable sweep algorithm for the
/// cumulative constraint’, in Principles and Practice of Constraint Programming, 2012,
/// pp. 439–454.
pub(crate) fn sweep<
    Var: IntegerVariable + 'static,
    PVar: IntegerVariable + 'static,
    RVar: IntegerVariable + 'static,
    CVar: IntegerVariable + 'static,
>(
    context: &mut PropagationContextMut,
    parameters: &CumulativeParameters<Var, PVar, RVar, CVar>,
) -> Result<TimeTable, Inconsistency> {
    // A present task which runs for a non-zero amount of time needs its full resource usage
    let largest_resource_usage = parameters
        .tasks
        .iter()
        .filter(|task| task.is_present(context) && context.lower_bound(&task.processing_time) > 0)
        .map(|task| context.lower_bound(&task.resource_usage))
        .max();
    if let Some(resource_usage) = largest_resource_usage {
        context.set_lower_bound(&parameters.capacity, resource_usage)?;
    }

    let capacity = context.upper_bound(&parameters.capacity) as i64;

    let mut sweep_tasks = parameters
        .tasks
        .iter()
        .map(|task| SweepTask {
            duration: context.lower_bound(&task.processing_time),
            resource_usage: context.lower_bound(&task.resource_usage),
            contributes_to_profile: false,
            open_run: None,
            conflicting_runs: Vec::new(),
        })
        .collect::<Vec<_>>();

    let events = create_events(context, parameters);
    cumulus_assert_extreme!(
        events
            .windows(2)
            .all(|pair| (pair[0].time_stamp, pair[0].kind) <= (pair[1].time_stamp, pair[1].kind)),
        "Events were not sorted chronologically"
    );

    let mut time_table = TimeTable::new();
    let mut candidates = Candidates::new(parameters.tasks.len());
    let mut current_resource_usage: i64 = 0;

    let mut index = 0;
    while index < events.len() {
        let time_stamp = events[index].time_stamp;

        // First we apply all of the changes to the profile which occur at this time point
        while index < events.len()
            && events[index].time_stamp == time_stamp
            && events[index].kind == EventKind::Profile
        {
            let event = events[index];
            current_resource_usage += event.change_in_resource_usage;
            sweep_tasks[event.task].contributes_to_profile = event.change_in_resource_usage > 0;
            index += 1;
        }

        if current_resource_usage > capacity {
            return Err(PropagatorConflict {
                propagator: context.propagator_id(),
                reason: ConflictReason::ResourceOverload {
                    time: time_stamp,
                    usage: current_resource_usage,
                    capacity,
                },
            }
            .into());
        }
        // The profile does not exceed the capacity and thus fits in an i32
        context.set_lower_bound(&parameters.capacity, current_resource_usage as i32)?;

        // Then we close the windows which end at this time point...
        while index < events.len()
            && events[index].time_stamp == time_stamp
            && events[index].kind == EventKind::PruneClose
        {
            let task = events[index].task;
            candidates.remove(task);
            close_window(
                context,
                &parameters.tasks[task],
                &mut sweep_tasks[task],
                time_stamp,
                parameters.options,
            )?;
            index += 1;
        }

        // ...and open the windows which start at this time point
        while index < events.len()
            && events[index].time_stamp == time_stamp
            && events[index].kind == EventKind::PruneOpen
        {
            candidates.insert(events[index].task);
            index += 1;
        }

        // All windows are closed at the last time point
        let Some(next_time_stamp) = events.get(index).map(|event| event.time_stamp) else {
            break;
        };

        if current_resource_usage > 0 {
            push_or_merge_profile(
                &mut time_table,
                ResourceProfile {
                    start: time_stamp,
                    end: next_time_stamp - 1,
                    height: current_resource_usage as i32,
                },
            );
        }

        // The profile is constant on [time_stamp, next_time_stamp)
        for &task in candidates.tasks.iter() {
            sweep_segment(
                context,
                &parameters.tasks[task],
                &mut sweep_tasks[task],
                time_stamp,
                capacity - current_resource_usage,
                parameters.options,
            )?;
        }
    }

    cumulus_assert_moderate!(candidates.tasks.is_empty());
    cumulus_assert_moderate!(current_resource_usage == 0);

    Ok(time_table)
}

/// Creates the events of the sweep:
/// - the starts and ends of the mandatory parts `[lst, ect)` of the present tasks;
/// - the starts and ends of the windows `[est, lct)` of the present tasks which might still use
///   the resource and which overlap the range of the mandatory parts.
fn create_events<
    Var: IntegerVariable + 'static,
    PVar: IntegerVariable + 'static,
    RVar: IntegerVariable + 'static,
    CVar: IntegerVariable + 'static,
>(
    context: &PropagationContextMut,
    parameters: &CumulativeParameters<Var, PVar, RVar, CVar>,
) -> Vec<Event> {
    let mut events = Vec::new();
    let mut profile_range: Option<(i32, i32)> = None;

    for (index, task) in parameters.tasks.iter().enumerate() {
        if !task.is_present(context) {
            continue;
        }

        let lst = task.lst(context);
        let ect = task.ect(context);
        let resource_usage = context.lower_bound(&task.resource_usage) as i64;
        if lst < ect && resource_usage > 0 {
            events.push(Event {
                time_stamp: lst,
                kind: EventKind::Profile,
                task: index,
                change_in_resource_usage: resource_usage,
            });
            events.push(Event {
                time_stamp: ect,
                kind: EventKind::Profile,
                task: index,
                change_in_resource_usage: -resource_usage,
            });

            profile_range = Some(match profile_range {
                Some((start, end)) => (start.min(lst), end.max(ect)),
                None => (lst, ect),
            });
        }
    }

    let Some((range_start, range_end)) = profile_range else {
        return events;
    };

    for (index, task) in parameters.tasks.iter().enumerate() {
        if !task.is_present(context) || !task.may_use_resource(context) {
            continue;
        }

        let est = task.est(context);
        let lct = task.lct(context);
        if est < range_end && lct > range_start {
            events.push(Event {
                time_stamp: est,
                kind: EventKind::PruneOpen,
                task: index,
                change_in_resource_usage: 0,
            });
            events.push(Event {
                time_stamp: lct,
                kind: EventKind::PruneClose,
                task: index,
                change_in_resource_usage: 0,
            });
        }
    }

    events.sort_unstable_by_key(|event| (event.time_stamp, event.kind, event.task));
    events
}

/// Processes a candidate over the segment starting at `time_stamp` during which the other tasks
/// leave `available` of the capacity (not taking into account the task itself).
fn sweep_segment<
    Var: IntegerVariable + 'static,
    PVar: IntegerVariable + 'static,
    RVar: IntegerVariable + 'static,
>(
    context: &mut PropagationContextMut,
    task: &Task<Var, PVar, RVar>,
    sweep_task: &mut SweepTask,
    time_stamp: i32,
    available: i64,
    options: CumulativePropagatorOptions,
) -> Result<(), EmptyDomain> {
    let available = if sweep_task.contributes_to_profile {
        available + sweep_task.resource_usage as i64
    } else {
        available
    };

    if available < sweep_task.resource_usage as i64 {
        if sweep_task.open_run.is_none() {
            sweep_task.open_run = Some(time_stamp);
        }
    } else if let Some(run_start) = sweep_task.open_run.take() {
        exclude_run(context, task, sweep_task, run_start, time_stamp - 1, options)?;
    }

    if sweep_task.contributes_to_profile && options.prune_resource_usages {
        // The profile fits in the capacity, thus 0 <= available <= capacity
        cumulus_assert_moderate!(available >= 0);
        if (available as i32) < context.upper_bound(&task.resource_usage) {
            trace!(
                "Lowering resource usage of task {} to {available} at {time_stamp}",
                task.id
            );
        }
        context.set_upper_bound(&task.resource_usage, available as i32)?;
    }

    Ok(())
}

/// Processes the end of the window of a task; closes the run which is still open and then lowers
/// the maximal processing time of the task.
fn close_window<
    Var: IntegerVariable + 'static,
    PVar: IntegerVariable + 'static,
    RVar: IntegerVariable + 'static,
>(
    context: &mut PropagationContextMut,
    task: &Task<Var, PVar, RVar>,
    sweep_task: &mut SweepTask,
    time_stamp: i32,
    options: CumulativePropagatorOptions,
) -> Result<(), EmptyDomain> {
    if let Some(run_start) = sweep_task.open_run.take() {
        exclude_run(context, task, sweep_task, run_start, time_stamp - 1, options)?;
    }

    if options.prune_durations
        && sweep_task.resource_usage > 0
        && !sweep_task.conflicting_runs.is_empty()
    {
        prune_processing_time(context, task, sweep_task)?;
    }

    Ok(())
}

/// The task does not fit at any time point in `[from, to]`, thus it cannot start in `[from -
/// duration + 1, to]`.
fn exclude_run<
    Var: IntegerVariable + 'static,
    PVar: IntegerVariable + 'static,
    RVar: IntegerVariable + 'static,
>(
    context: &mut PropagationContextMut,
    task: &Task<Var, PVar, RVar>,
    sweep_task: &mut SweepTask,
    from: i32,
    to: i32,
    options: CumulativePropagatorOptions,
) -> Result<(), EmptyDomain> {
    cumulus_assert_moderate!(from <= to);
    sweep_task.conflicting_runs.push((from, to));

    if sweep_task.duration <= 0 {
        return Ok(());
    }

    // Start times below i32::MIN are not part of any domain
    let first_start = (from as i64 - sweep_task.duration as i64 + 1).max(i32::MIN as i64) as i32;
    trace!(
        "Task {} cannot start in [{first_start}, {to}], it does not fit in [{from}, {to}]",
        task.id
    );

    if options.allow_holes_in_domain {
        return context.remove_interval(&task.start_variable, first_start, to);
    }

    // Without holes, only runs which cover one of the bounds are applied
    if first_start <= context.lower_bound(&task.start_variable) {
        context.set_lower_bound(&task.start_variable, to + 1)
    } else if to >= context.upper_bound(&task.start_variable) {
        context.set_upper_bound(&task.start_variable, first_start - 1)
    } else {
        Ok(())
    }
}

/// Lowers the maximal processing time of the task to the longest stretch, starting at a start
/// time in its domain, which does not intersect a run during which the task does not fit.
///
/// Only the first value of every interval of the domain and the values directly after a run need
/// to be considered; if there is a start time after which the task fits for the remainder of its
/// window, the processing time is not restricted.
fn prune_processing_time<
    Var: IntegerVariable + 'static,
    PVar: IntegerVariable + 'static,
    RVar: IntegerVariable + 'static,
>(
    context: &mut PropagationContextMut,
    task: &Task<Var, PVar, RVar>,
    sweep_task: &SweepTask,
) -> Result<(), EmptyDomain> {
    let mut longest_stretch: i64 = 0;

    for (from, to) in context.domain_intervals(&task.start_variable) {
        let starts = std::iter::once(from).chain(
            sweep_task
                .conflicting_runs
                .iter()
                .map(|&(_, run_end)| run_end + 1)
                .filter(|&start| from < start && start <= to),
        );

        for start in starts {
            match sweep_task
                .conflicting_runs
                .iter()
                .find(|&&(_, run_end)| run_end >= start)
            {
                Some(&(run_start, _)) => {
                    longest_stretch = longest_stretch.max(run_start as i64 - start as i64);
                }
                None => return Ok(()),
            }
        }
    }

    if longest_stretch < context.upper_bound(&task.processing_time) as i64 {
        trace!(
            "Lowering the processing time of task {} to {longest_stretch}",
            task.id
        );
        // Smaller than an existing upper-bound so it fits in an i32
        context.set_upper_bound(&task.processing_time, longest_stretch as i32)?;
    }

    Ok(())
}
