/// A [`ResourceProfile`] represents a rectangle where the height is the cumulative mandatory
/// resource usage of the tasks whose mandatory parts overlap the interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ResourceProfile {
    /// The start time of the [`ResourceProfile`] (inclusive)
    pub(crate) start: i32,
    /// The end time of the [`ResourceProfile`] (inclusive)
    pub(crate) end: i32,
    /// The amount of cumulative resource usage (i.e. the height of the rectangle)
    pub(crate) height: i32,
}

/// Adds the profile to the end of the time-table, extending the last profile instead if it ends
/// right before `profile` and has the same height.
pub(crate) fn push_or_merge_profile(time_table: &mut Vec<ResourceProfile>, profile: ResourceProfile) {
    if let Some(last) = time_table.last_mut() {
        if last.end + 1 == profile.start && last.height == profile.height {
            last.end = profile.end;
            return;
        }
    }
    time_table.push(profile);
}
