use std::fmt::Display;

use super::PropagationContextMut;
use super::PropagatorInitialisationContext;
use crate::basic_types::ConstructionError;
#[cfg(doc)]
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
#[cfg(doc)]
use crate::create_statistics_struct;
use crate::statistics::StatisticLogger;

/// All propagators implement the [`Propagator`] trait, which defines the main propagator logic.
///
/// The [`Display`] implementation is the textual identity of the propagator which is used in
/// debug output.
pub trait Propagator: Display {
    /// Return the name of the propagator, this is a convenience method that is used for printing.
    fn name(&self) -> &str;

    /// Returns the priority of the propagator represented as an integer. Lower values mean higher
    /// priority and the priority determines the order in which propagators will be asked to
    /// propagate. It is custom for simpler propagators to have lower priority values.
    ///
    /// By default the priority is set to 3. It is expected that propagator implementations would
    /// set this value to some appropriate value.
    fn priority(&self) -> u32 {
        3
    }

    /// Called once when the propagator is added to the store.
    ///
    /// The propagator validates its arguments against the initial domains, and declares its scope
    /// by registering for the domain events of its variables through
    /// [`PropagatorInitialisationContext::register`].
    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> Result<(), ConstructionError>;

    /// A propagation method that is used to help debugging.
    ///
    /// This method propagates without relying on internal data structures, hence the immutable
    /// &self parameter. It is usually best to implement this propagation method in the simplest
    /// but correct way.
    fn debug_propagate_from_scratch(&self, context: PropagationContextMut) -> PropagationStatusCP;

    /// Extends the current domains with the domain changes found by the [`Propagator`]. In case
    /// no conflict has been detected it should return [`Result::Ok`], otherwise it should return
    /// a [`Result::Err`] with an [`Inconsistency`] which contains the reason for the failure;
    /// either because a propagation caused an empty domain ([`Inconsistency::EmptyDomain`]) or
    /// because the logic of the propagator found the current state to be inconsistent
    /// ([`Inconsistency::Conflict`]).
    ///
    /// By default, this function calls [`Propagator::debug_propagate_from_scratch`].
    fn propagate(&mut self, context: PropagationContextMut) -> PropagationStatusCP {
        self.debug_propagate_from_scratch(context)
    }

    /// Logs statistics of the propagator using the provided [`StatisticLogger`].
    ///
    /// It is recommended to create a struct through the [`create_statistics_struct!`] macro!
    fn log_statistics(&self, _statistic_logger: StatisticLogger) {}
}
