mod propagation_context;
mod propagator_initialisation_context;

pub use propagation_context::*;
pub use propagator_initialisation_context::PropagatorInitialisationContext;
