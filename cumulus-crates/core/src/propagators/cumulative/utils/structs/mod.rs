mod parameters;
mod resource_profile;
mod task;
mod task_bounds;

pub(crate) use parameters::*;
pub(crate) use resource_profile::*;
pub use task::ArgTask;
pub(crate) use task::Task;
pub(crate) use task_bounds::*;
