use crate::algorithms::common::PathSearch;
use crate::grid::Location;
use crate::statistics::SearchStats;
use log::{debug, warn};
use pathfinding::prelude::astar;

/// A* provided by the `pathfinding` crate, over the same safety predicate.
///
/// Mostly useful as a cross-check for [`AStar`](crate::algorithms::a_star::AStar).
/// Ties between equal-cost routes may resolve differently, lengths never do.
#[derive(Default)]
pub struct LibraryAStar {
    max_expansions: Option<usize>,
    stats: SearchStats,
}

impl LibraryAStar {
    pub fn new() -> Self {
        LibraryAStar::default()
    }

    /// Stops generating successors after `limit` expansions, which drains the
    /// frontier and ends the search with "no path".
    pub fn with_max_expansions(limit: usize) -> Self {
        LibraryAStar {
            max_expansions: Some(limit),
            stats: SearchStats::default(),
        }
    }
}

impl PathSearch for LibraryAStar {
    /// Finds a path from start to goal using `pathfinding::prelude::astar`.
    ///
    /// # Arguments
    ///
    /// * `start` - The agent's current location.
    /// * `goal` - The objective.
    /// * `is_safe` - Accepts the cells the agent may step on.
    ///
    /// # Returns
    ///
    /// The path including both endpoints, or `None` if no path is found.
    fn find_path(
        &mut self,
        start: Location,
        goal: Location,
        is_safe: &dyn Fn(Location) -> bool,
    ) -> Option<Vec<Location>> {
        self.stats = SearchStats::default();

        if start != goal && !is_safe(goal) {
            debug!("Goal {} is blocked, skipping search", goal);
            return None;
        }

        let limit = self.max_expansions;
        let mut expanded = 0usize;
        let mut discovered = 1usize;
        let mut exhausted = false;

        let result = astar(
            &start,
            |cell| {
                if limit.is_some_and(|limit| expanded >= limit) {
                    exhausted = true;
                    return Vec::new();
                }
                expanded += 1;
                // Cost of moving to a neighbor is 1.
                let successors: Vec<(Location, u64)> = cell
                    .get_neighbors()
                    .into_iter()
                    .filter(|&neighbor| is_safe(neighbor))
                    .map(|neighbor| (neighbor, 1))
                    .collect();
                discovered += successors.len();
                successors
            },
            |cell| cell.manhattan_distance(&goal),
            |cell| *cell == goal,
        );

        // The goal itself is never handed to the successor function.
        self.stats.nodes_expanded = if result.is_some() { expanded + 1 } else { expanded };
        self.stats.nodes_discovered = discovered;
        self.stats.budget_exhausted = result.is_none() && exhausted;
        if self.stats.budget_exhausted {
            warn!(
                "pathfinding astar gave up after {} expansions searching {} -> {}",
                expanded, start, goal
            );
        }

        result.map(|(path, cost)| {
            self.stats.path_length = Some(cost as usize);
            path
        })
    }

    fn name(&self) -> &'static str {
        "library_a_star"
    }

    fn last_stats(&self) -> &SearchStats {
        &self.stats
    }
}
