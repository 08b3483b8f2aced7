//! Contains the propagator for the [Cumulative](https://sofdem.github.io/gccat/gccat/Ccumulative.html) constraint.
//!
//! The cumulative constraint ensures that at no point in time the cumulative resource usage of
//! the tasks exceeds `capacity`:
//! ```text
//! ∀ t: (∑_{i ∈ T : s_i ≤ t < s_i + p_i} r_i) ≤ capacity
//! ```
//! where the start time `s_i`, the processing time `p_i` and the resource usage `r_i` of every
//! task `i ∈ T` and the capacity are variables. A task can be optional, in which case it only
//! uses the resource if its presence variable is 1.
//!
//! The [`CumulativePropagator`] always applies time-table reasoning (see the `time_table`
//! module); depending on the [`CumulativePropagationMethod`] it additionally applies the
//! capacitated edge-finding of Vilím or the rules for unary resources to the tasks which cannot
//! overlap.
//!
//! # Bibliography
//! \[1\] A. Schutt, Improving scheduling by learning. University of Melbourne, Department of
//! Computer Science and Software Engineering, 2011.
//!
//! \[2\] P. Vilím, ‘Edge finding filtering algorithm for discrete cumulative resources in O(kn log
//! n)’, in Principles and Practice of Constraint Programming-CP 2009: 15th International
//! Conference, CP 2009 Lisbon, Portugal, September 20-24, 2009 Proceedings 15, 2009, pp. 802–816.
mod cumulative_propagator;
mod edge_finding;
mod options;
mod statistics;
mod time_table;
mod utils;

pub use cumulative_propagator::CumulativePropagator;
pub use options::*;
pub(crate) use statistics::CumulativeStatistics;
pub use utils::ArgTask;
pub(crate) use utils::*;
