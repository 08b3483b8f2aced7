use crate::create_statistics_struct;

create_statistics_struct!(
    /// Statistics of a cumulative propagator which are logged through
    /// [`Propagator::log_statistics`](crate::engine::propagation::Propagator::log_statistics).
    CumulativeStatistics {
        /// The number of times that the propagator was called
        number_of_propagation_calls: usize,
        /// The number of sweeps over the time axis
        number_of_sweeps: usize,
        /// The number of times that the edge-finding rules were applied (in both directions)
        number_of_edge_finding_rounds: usize,
        /// The number of calls which ended in a conflict or an empty domain
        number_of_conflicts: usize,
        /// The number of optional tasks which were found to be absent
        number_of_presences_pruned: usize,
    }
);
