use crate::grid::Location;
use crate::statistics::SearchStats;

/// A shortest-path search over the unbounded 4-connected grid.
pub trait PathSearch {
    /// Finds a shortest path from `start` to `goal` that only steps on cells
    /// `is_safe` accepts. The path starts with `start` and ends with `goal`;
    /// `start == goal` yields the single-cell path.
    fn find_path(
        &mut self,
        start: Location,
        goal: Location,
        is_safe: &dyn Fn(Location) -> bool,
    ) -> Option<Vec<Location>>;

    fn name(&self) -> &'static str;

    /// Statistics of the most recent `find_path` call.
    fn last_stats(&self) -> &SearchStats;
}
