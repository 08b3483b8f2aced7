/// A snapshot of the bounds of a task as seen from a [`TimeDirection`]; the edge-finding rules
/// and the trees only operate on these snapshots.
///
/// [`TimeDirection`]: crate::propagators::cumulative::TimeDirection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TaskBounds {
    /// The index of the task in the parameters of the propagator
    pub(crate) task: usize,
    pub(crate) est: i32,
    pub(crate) lst: i32,
    pub(crate) ect: i32,
    pub(crate) lct: i32,
    /// The minimal processing time
    pub(crate) duration: i32,
    /// The minimal resource usage
    pub(crate) resource_usage: i32,
    /// `duration * resource_usage`
    pub(crate) energy: i64,
}
