//! Utilities for the propagators of the [Cumulative](https://sofdem.github.io/gccat/gccat/Ccumulative.html)
//! constraint which are shared by the time-tabling and the edge-finding reasoning.

mod structs;
pub(crate) use structs::*;

mod time_direction;
pub use structs::ArgTask;
pub(crate) use time_direction::*;
