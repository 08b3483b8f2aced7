//! Time-table reasoning for the cumulative constraint; a time-table is a structure which stores
//! the mandatory resource usage of the tasks at different time points.
//!
//! The time-table is created by a sweep over the time axis which prunes the tasks while the
//! time-table is being built (see [`sweep`]). After every sweep the optional tasks are checked
//! against the time-table (see [`prune_optional_tasks`]); this is repeated until no domain
//! changes.
mod optional_tasks;
mod sweep;

use log::debug;
pub(crate) use optional_tasks::prune_optional_tasks;
pub(crate) use sweep::sweep;
pub(crate) use sweep::TimeTable;

use crate::basic_types::PropagationStatusCP;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::variables::IntegerVariable;
use crate::propagators::cumulative::CumulativeParameters;
use crate::propagators::cumulative::CumulativeStatistics;

/// Applies time-table reasoning until a fixpoint is reached.
pub(crate) fn propagate_time_table<
    Var: IntegerVariable + 'static,
    PVar: IntegerVariable + 'static,
    RVar: IntegerVariable + 'static,
    CVar: IntegerVariable + 'static,
>(
    context: &mut PropagationContextMut,
    parameters: &CumulativeParameters<Var, PVar, RVar, CVar>,
    statistics: &mut CumulativeStatistics,
) -> PropagationStatusCP {
    loop {
        let num_domain_changes = context.num_domain_changes();
        statistics.number_of_sweeps += 1;

        let time_table = sweep(context, parameters)?;
        prune_optional_tasks(context, parameters, &time_table, statistics)?;

        if context.num_domain_changes() == num_domain_changes {
            return Ok(());
        }
        debug!(
            "Time-table sweep made {} domain changes",
            context.num_domain_changes() - num_domain_changes
        );
    }
}
