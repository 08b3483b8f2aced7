use log::debug;

use super::TimeTable;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;
use crate::engine::EmptyDomain;
use crate::propagators::cumulative::CumulativeParameters;
use crate::propagators::cumulative::CumulativeStatistics;

/// Checks, for every optional task, whether there is a start time in its domain at which it fits
/// on top of the time-table; if there is no such start time then the task is made absent.
///
/// A task is never made present by this check.
pub(crate) fn prune_optional_tasks<
    Var: IntegerVariable + 'static,
    PVar: IntegerVariable + 'static,
    RVar: IntegerVariable + 'static,
    CVar: IntegerVariable + 'static,
>(
    context: &mut PropagationContextMut,
    parameters: &CumulativeParameters<Var, PVar, RVar, CVar>,
    time_table: &TimeTable,
    statistics: &mut CumulativeStatistics,
) -> Result<(), EmptyDomain> {
    let capacity = context.upper_bound(&parameters.capacity) as i64;

    for task in parameters.tasks.iter() {
        let Some(presence) = task.presence.as_ref() else {
            continue;
        };
        if !task.is_optional(context) {
            continue;
        }

        let duration = context.lower_bound(&task.processing_time) as i64;
        let resource_usage = context.lower_bound(&task.resource_usage) as i64;
        if duration <= 0 || resource_usage <= 0 {
            continue;
        }

        if resource_usage > capacity
            || !has_feasible_start(
                &context.domain_intervals(&task.start_variable),
                duration,
                time_table,
                capacity - resource_usage,
            )
        {
            debug!("Optional task {} does not fit on the resource", task.id);
            context.set_upper_bound(presence, 0)?;
            statistics.number_of_presences_pruned += 1;
        }
    }

    Ok(())
}

/// Returns true if there is a start time `s` in one of the `intervals` such that `[s, s +
/// duration)` does not intersect a profile with a height larger than `allowed_height`.
fn has_feasible_start(
    intervals: &[(i32, i32)],
    duration: i64,
    time_table: &TimeTable,
    allowed_height: i64,
) -> bool {
    let mut forbidden_profiles = time_table
        .iter()
        .filter(|profile| profile.height as i64 > allowed_height)
        .peekable();

    for &(from, to) in intervals {
        let mut start = from as i64;
        while start <= to as i64 {
            // Profiles which end before the start time can be skipped for all later start times
            while forbidden_profiles
                .next_if(|profile| (profile.end as i64) < start)
                .is_some()
            {}

            match forbidden_profiles.peek() {
                Some(profile) if (profile.start as i64) < start + duration => {
                    start = profile.end as i64 + 1;
                }
                _ => return true,
            }
        }
    }

    false
}
