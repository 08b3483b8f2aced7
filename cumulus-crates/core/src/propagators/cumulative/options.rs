#[derive(Debug, Clone, Copy)]
pub struct CumulativePropagatorOptions {
    /// Specifies whether it is allowed to create holes in the domain; if this parameter is set to
    /// false then it will only adjust the bounds when appropriate rather than removing values from
    /// the domain
    pub allow_holes_in_domain: bool,
    /// Specifies whether the maximal resource usage of a task is lowered to the capacity which is
    /// left over by the other tasks during its mandatory part
    pub prune_resource_usages: bool,
    /// Specifies whether the maximal processing time of a task is lowered to the longest stretch
    /// during which it fits on the resource
    pub prune_durations: bool,
}

impl Default for CumulativePropagatorOptions {
    fn default() -> Self {
        Self {
            allow_holes_in_domain: true,
            prune_resource_usages: true,
            prune_durations: true,
        }
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub struct CumulativeOptions {
    /// The propagation method which is used for the cumulative constraints; time-table reasoning
    /// is always applied, the method determines which energetic reasoning is applied after the
    /// time-table reaches a fixpoint. The default is time-tabling combined with capacitated
    /// edge-finding.
    pub(crate) propagation_method: CumulativePropagationMethod,
    /// The options which are passed to the propagator itself
    pub(crate) propagator_options: CumulativePropagatorOptions,
}

impl CumulativeOptions {
    pub fn new(
        propagation_method: CumulativePropagationMethod,
        allow_holes_in_domain: bool,
        prune_resource_usages: bool,
        prune_durations: bool,
    ) -> Self {
        Self {
            propagation_method,
            propagator_options: CumulativePropagatorOptions {
                allow_holes_in_domain,
                prune_resource_usages,
                prune_durations,
            },
        }
    }

    pub fn propagation_method(&self) -> CumulativePropagationMethod {
        self.propagation_method
    }

    pub fn propagator_options(&self) -> CumulativePropagatorOptions {
        self.propagator_options
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum CumulativePropagationMethod {
    /// Only time-table reasoning.
    TimeTable,
    /// Time-table reasoning followed by the capacitated edge-finding of Vilím.
    #[default]
    TimeTableEdgeFinding,
    /// Time-table reasoning followed by the unary rules (overload checking, detectable
    /// precedences, not-first/not-last and edge-finding) on the tasks which cannot overlap.
    TimeTableUnaryEdgeFinding,
}
