use std::fmt::Display;
use std::fmt::Formatter;

use log::debug;
use log::warn;

use super::edge_finding::capacitated_edge_finding;
use super::edge_finding::unary_edge_finding;
use super::time_table::propagate_time_table;
use super::ArgTask;
use super::CumulativeOptions;
use super::CumulativeParameters;
use super::CumulativePropagationMethod;
use super::CumulativeStatistics;
use super::Forward;
use super::Reversed;
use crate::basic_types::ConstructionError;
use crate::basic_types::PropagationStatusCP;
use crate::engine::propagation::LocalId;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorInitialisationContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;
use crate::engine::DomainEvents;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

/// [`Propagator`] for the [Cumulative](https://sofdem.github.io/gccat/gccat/Ccumulative.html)
/// constraint with variable start times, processing times, resource usages and capacity, and
/// optional tasks.
///
/// Every call applies time-table reasoning until a fixpoint is reached; when the time-table does
/// not change any domain, the energetic reasoning selected by the [`CumulativePropagationMethod`]
/// is applied in both time directions. This is repeated until neither changes a domain, which
/// makes the propagator idempotent.
#[derive(Debug, Clone)]
pub struct CumulativePropagator<Var, PVar, RVar, CVar> {
    /// Stores the input parameters to the cumulative constraint
    parameters: CumulativeParameters<Var, PVar, RVar, CVar>,
    propagation_method: CumulativePropagationMethod,
    statistics: CumulativeStatistics,
}

impl<
        Var: IntegerVariable + 'static,
        PVar: IntegerVariable + 'static,
        RVar: IntegerVariable + 'static,
        CVar: IntegerVariable + 'static,
    > CumulativePropagator<Var, PVar, RVar, CVar>
{
    pub fn new(
        arg_tasks: &[ArgTask<Var, PVar, RVar>],
        capacity: CVar,
        options: CumulativeOptions,
    ) -> Self {
        CumulativePropagator {
            parameters: CumulativeParameters::new(
                arg_tasks,
                capacity,
                options.propagator_options(),
            ),
            propagation_method: options.propagation_method(),
            statistics: CumulativeStatistics::default(),
        }
    }

    /// Checks the arguments against the initial domains.
    ///
    /// All time points which are derived from the bounds of a task, and their negations, need to
    /// fit in an `i32`; the largest energy which can be derived from the tasks and the capacity
    /// needs to fit in an `i64` with room to spare for the intermediate results of edge-finding.
    fn check_arguments(&self, context: PropagationContext) -> Result<(), ConstructionError> {
        if context.lower_bound(&self.parameters.capacity) < 0 {
            return Err(ConstructionError::NegativeCapacity);
        }

        let mut horizon: i64 = 0;
        let mut total_energy: i64 = 0;
        for (index, task) in self.parameters.tasks.iter().enumerate() {
            if context.lower_bound(&task.processing_time) < 0 {
                return Err(ConstructionError::NegativeDuration { task: index });
            }
            if context.lower_bound(&task.resource_usage) < 0 {
                return Err(ConstructionError::NegativeResourceUsage { task: index });
            }
            if let Some(presence) = task.presence.as_ref() {
                if context.lower_bound(presence) < 0 || context.upper_bound(presence) > 1 {
                    return Err(ConstructionError::PresenceNotBoolean { task: index });
                }
            }

            let est = context.lower_bound(&task.start_variable) as i64;
            let lct = context.upper_bound(&task.start_variable) as i64
                + context.upper_bound(&task.processing_time) as i64;
            if est < -(i32::MAX as i64) || lct > i32::MAX as i64 {
                return Err(ConstructionError::TimeOverflow { task: index });
            }
            horizon = horizon.max(est.abs()).max(lct.abs());

            let energy = context.upper_bound(&task.processing_time) as i64
                * context.upper_bound(&task.resource_usage) as i64;
            total_energy = total_energy
                .checked_add(energy)
                .ok_or(ConstructionError::EnergyOverflow)?;
        }

        let _ = (context.upper_bound(&self.parameters.capacity) as i64 * horizon)
            .checked_add(total_energy)
            .and_then(|largest_energy| largest_energy.checked_mul(4))
            .ok_or(ConstructionError::EnergyOverflow)?;

        Ok(())
    }
}

impl<
        Var: IntegerVariable + 'static,
        PVar: IntegerVariable + 'static,
        RVar: IntegerVariable + 'static,
        CVar: IntegerVariable + 'static,
    > Propagator for CumulativePropagator<Var, PVar, RVar, CVar>
{
    fn name(&self) -> &str {
        match self.propagation_method {
            CumulativePropagationMethod::TimeTable => "CumulativeTimeTable",
            CumulativePropagationMethod::TimeTableEdgeFinding => "CumulativeTimeTableEdgeFinding",
            CumulativePropagationMethod::TimeTableUnaryEdgeFinding => {
                "CumulativeTimeTableUnaryEdgeFinding"
            }
        }
    }

    fn priority(&self) -> u32 {
        3
    }

    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> Result<(), ConstructionError> {
        self.check_arguments(context.as_readonly())?;

        let num_tasks = self.parameters.tasks.len() as u32;
        for task in self.parameters.tasks.iter() {
            let index = task.id.unpack();
            // Holes in the domain of the start time influence the pruning of optional tasks and
            // processing times
            let _ = context.register(
                task.start_variable.clone(),
                DomainEvents::ANY_INT,
                LocalId::from(index),
            );
            let _ = context.register(
                task.processing_time.clone(),
                DomainEvents::BOUNDS,
                LocalId::from(num_tasks + index),
            );
            let _ = context.register(
                task.resource_usage.clone(),
                DomainEvents::BOUNDS,
                LocalId::from(2 * num_tasks + index),
            );
            if let Some(presence) = task.presence.as_ref() {
                let _ = context.register(
                    presence.clone(),
                    DomainEvents::BOUNDS,
                    LocalId::from(3 * num_tasks + index),
                );
            }
        }
        let _ = context.register(
            self.parameters.capacity.clone(),
            DomainEvents::BOUNDS,
            LocalId::from(4 * num_tasks),
        );

        if self.propagation_method == CumulativePropagationMethod::TimeTableUnaryEdgeFinding {
            let capacity = context.lower_bound(&self.parameters.capacity) as i64;
            if self
                .parameters
                .tasks
                .iter()
                .all(|task| 2 * context.upper_bound(&task.resource_usage) as i64 <= capacity)
            {
                warn!(
                    "{self} uses the unary rules but no two of its tasks are prevented from \
                     overlapping"
                );
            }
        }

        Ok(())
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        self.statistics.number_of_propagation_calls += 1;
        let result = propagate_to_fixpoint(
            &mut context,
            &self.parameters,
            self.propagation_method,
            &mut self.statistics,
        );
        if let Err(inconsistency) = &result {
            debug!("{} found {inconsistency:?}", self.name());
            self.statistics.number_of_conflicts += 1;
        }
        result
    }

    fn debug_propagate_from_scratch(
        &self,
        mut context: PropagationContextMut,
    ) -> PropagationStatusCP {
        propagate_to_fixpoint(
            &mut context,
            &self.parameters,
            self.propagation_method,
            &mut CumulativeStatistics::default(),
        )
    }

    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger);
    }
}

impl<
        Var: IntegerVariable + 'static,
        PVar: IntegerVariable + 'static,
        RVar: IntegerVariable + 'static,
        CVar: IntegerVariable + 'static,
    > Display for CumulativePropagator<Var, PVar, RVar, CVar>
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}([", self.name())?;
        for (index, task) in self.parameters.tasks.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(
                f,
                "({:?}, {:?}, {:?}",
                task.start_variable, task.processing_time, task.resource_usage
            )?;
            if let Some(presence) = task.presence.as_ref() {
                write!(f, ", {presence:?}")?;
            }
            write!(f, ")")?;
        }
        write!(f, "], {:?})", self.parameters.capacity)
    }
}

/// Alternates between time-table reasoning and the energetic reasoning of the propagation method
/// until neither of them changes a domain.
fn propagate_to_fixpoint<
    Var: IntegerVariable + 'static,
    PVar: IntegerVariable + 'static,
    RVar: IntegerVariable + 'static,
    CVar: IntegerVariable + 'static,
>(
    context: &mut PropagationContextMut,
    parameters: &CumulativeParameters<Var, PVar, RVar, CVar>,
    propagation_method: CumulativePropagationMethod,
    statistics: &mut CumulativeStatistics,
) -> PropagationStatusCP {
    loop {
        let num_domain_changes = context.num_domain_changes();

        propagate_time_table(context, parameters, statistics)?;

        if context.num_domain_changes() == num_domain_changes {
            match propagation_method {
                CumulativePropagationMethod::TimeTable => {}
                CumulativePropagationMethod::TimeTableEdgeFinding => {
                    statistics.number_of_edge_finding_rounds += 1;
                    capacitated_edge_finding::<Forward, _, _, _, _>(context, parameters)?;
                    capacitated_edge_finding::<Reversed, _, _, _, _>(context, parameters)?;
                }
                CumulativePropagationMethod::TimeTableUnaryEdgeFinding => {
                    statistics.number_of_edge_finding_rounds += 1;
                    unary_edge_finding(context, parameters)?;
                }
            }
        }

        if context.num_domain_changes() == num_domain_changes {
            return Ok(());
        }
    }
}
