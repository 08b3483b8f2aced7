//! Contains containers which are used by the propagators and the domain store.
mod key_generator;
mod keyed_vec;

pub use key_generator::*;
pub use keyed_vec::*;
