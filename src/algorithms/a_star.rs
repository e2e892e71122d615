use crate::algorithms::common::PathSearch;
use crate::grid::Location;
use crate::statistics::SearchStats;
use log::{debug, trace, warn};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::BinaryHeap;

/// Priority of an open node. Lowest f wins, then lowest h, then the earliest push.
/// We implement Ord in reverse to make the BinaryHeap a min-heap.
#[derive(Clone, Copy, PartialEq, Eq)]
struct Key {
    f: u64,
    h: u64,
    seq: u64,
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Per-cell search record. `h` is fixed the first time a cell is discovered.
#[derive(Clone, Copy, Debug)]
struct NodeRecord {
    g: u64,
    h: u64,
    f: u64,
    parent: Option<Location>,
}

/// A* over the unbounded grid with unit step cost and a Manhattan heuristic.
///
/// All search state lives inside a single `find_path` call. Without a node
/// budget a goal walled off from an unbounded safe region is searched forever.
#[derive(Default)]
pub struct AStar {
    max_expansions: Option<usize>,
    stats: SearchStats,
}

impl AStar {
    pub fn new() -> Self {
        AStar::default()
    }

    /// Gives up with "no path" after `limit` node expansions.
    pub fn with_max_expansions(limit: usize) -> Self {
        AStar {
            max_expansions: Some(limit),
            stats: SearchStats::default(),
        }
    }

    pub fn max_expansions(&self) -> Option<usize> {
        self.max_expansions
    }
}

impl PathSearch for AStar {
    fn find_path(
        &mut self,
        start: Location,
        goal: Location,
        is_safe: &dyn Fn(Location) -> bool,
    ) -> Option<Vec<Location>> {
        self.stats = SearchStats::default();

        if start == goal {
            self.stats.path_length = Some(0);
            return Some(vec![start]);
        }
        // Unsafe cells are never entered, so neither is an unsafe goal.
        if !is_safe(goal) {
            debug!("Goal {} is blocked, skipping search", goal);
            return None;
        }

        let mut nodes: FxHashMap<Location, NodeRecord> = FxHashMap::default();
        let mut closed: FxHashSet<Location> = FxHashSet::default();
        let mut open = BinaryHeap::new();
        let mut seq = 0u64;

        let h = start.manhattan_distance(&goal);
        nodes.insert(
            start,
            NodeRecord {
                g: 0,
                h,
                f: h,
                parent: None,
            },
        );
        open.push((Key { f: h, h, seq }, start));
        seq += 1;
        self.stats.nodes_discovered = 1;

        while let Some((key, current)) = open.pop() {
            if closed.contains(&current) {
                continue;
            }
            let record = match nodes.get(&current) {
                Some(record) if record.f == key.f => *record,
                // Superseded by a cheaper entry pushed later.
                _ => continue,
            };

            if let Some(limit) = self.max_expansions {
                if self.stats.nodes_expanded >= limit {
                    self.stats.budget_exhausted = true;
                    warn!(
                        "A* gave up after {} expansions searching {} -> {}",
                        limit, start, goal
                    );
                    return None;
                }
            }

            closed.insert(current);
            self.stats.nodes_expanded += 1;
            trace!("Expanding {} (g={}, h={}, f={})", current, record.g, record.h, record.f);

            if current == goal {
                let path = reconstruct_path(&nodes, goal);
                self.stats.path_length = Some(path.len() - 1);
                debug!(
                    "A* found {} -> {} in {} moves, {} expansions",
                    start,
                    goal,
                    path.len() - 1,
                    self.stats.nodes_expanded
                );
                return Some(path);
            }

            for neighbor in current.get_neighbors() {
                if closed.contains(&neighbor) || !is_safe(neighbor) {
                    continue;
                }
                let tentative_g = record.g + 1;

                match nodes.entry(neighbor) {
                    Entry::Vacant(slot) => {
                        let h = neighbor.manhattan_distance(&goal);
                        let f = tentative_g + h;
                        slot.insert(NodeRecord {
                            g: tentative_g,
                            h,
                            f,
                            parent: Some(current),
                        });
                        open.push((Key { f, h, seq }, neighbor));
                        seq += 1;
                        self.stats.nodes_discovered += 1;
                    }
                    Entry::Occupied(mut slot) => {
                        let node = slot.get_mut();
                        if tentative_g < node.g {
                            node.g = tentative_g;
                            node.f = tentative_g + node.h;
                            node.parent = Some(current);
                            open.push((Key { f: node.f, h: node.h, seq }, neighbor));
                            seq += 1;
                        }
                    }
                }
            }
        }

        debug!(
            "A* exhausted the reachable region from {} after {} expansions",
            start, self.stats.nodes_expanded
        );
        None
    }

    fn name(&self) -> &'static str {
        "a_star"
    }

    fn last_stats(&self) -> &SearchStats {
        &self.stats
    }
}

/// Follows parent links back from `goal` and returns the path start-first.
fn reconstruct_path(nodes: &FxHashMap<Location, NodeRecord>, goal: Location) -> Vec<Location> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(parent) = nodes.get(&current).and_then(|node| node.parent) {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Direction, Route};
    use std::collections::HashSet;

    fn loc(x: i32, y: i32) -> Location {
        Location::new(x, y)
    }

    fn open_field(_: Location) -> bool {
        true
    }

    #[test]
    fn test_unobstructed_path_is_manhattan() {
        let mut engine = AStar::new();
        let start = loc(-2, 7);
        let goal = loc(3, 1);
        let path = engine.find_path(start, goal, &open_field).unwrap();
        let route = Route::from_path(&path);

        assert_eq!(route.len() as u64, start.manhattan_distance(&goal));
        assert!(route
            .steps()
            .iter()
            .all(|&step| step == Direction::East || step == Direction::North));
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
    }

    #[test]
    fn test_path_never_revisits_a_cell() {
        let mut engine = AStar::new();
        let wall = |cell: Location| !(cell.x == 0 && (-5..=5).contains(&cell.y));
        let path = engine.find_path(loc(-3, 0), loc(3, 0), &wall).unwrap();
        let unique: HashSet<_> = path.iter().collect();
        assert_eq!(unique.len(), path.len());
        assert!(path.iter().all(|&cell| wall(cell)));
    }

    #[test]
    fn test_detour_around_wall_is_shortest() {
        let mut engine = AStar::new();
        let wall = |cell: Location| !(cell.x == 1 && (-3..=3).contains(&cell.y));
        let path = engine.find_path(loc(0, 0), loc(2, 0), &wall).unwrap();
        assert_eq!(path.len() - 1, 10);
        assert_eq!(engine.last_stats().path_length, Some(10));
    }

    #[test]
    fn test_start_equals_goal_is_zero_length() {
        let mut engine = AStar::new();
        let path = engine.find_path(loc(4, 4), loc(4, 4), &open_field).unwrap();
        assert_eq!(path, vec![loc(4, 4)]);
        assert!(Route::from_path(&path).is_empty());
    }

    #[test]
    fn test_blocked_goal_has_no_path() {
        let mut engine = AStar::new();
        let blocked_goal = |cell: Location| cell != loc(5, 0);
        assert!(engine.find_path(loc(0, 0), loc(5, 0), &blocked_goal).is_none());
        assert_eq!(engine.last_stats().nodes_expanded, 0);
    }

    #[test]
    fn test_boxed_in_start_has_no_path() {
        let mut engine = AStar::new();
        let boxed = |cell: Location| cell.manhattan_distance(&loc(0, 0)) != 1;
        assert!(engine.find_path(loc(0, 0), loc(10, 10), &boxed).is_none());
        assert_eq!(engine.last_stats().nodes_expanded, 1);
        assert!(!engine.last_stats().budget_exhausted);
    }

    #[test]
    fn test_budget_stops_unbounded_search() {
        let mut engine = AStar::with_max_expansions(500);
        // Goal sealed inside a ring; the outside is unbounded.
        let ring = |cell: Location| cell.manhattan_distance(&loc(20, 0)) != 1;
        assert!(engine.find_path(loc(0, 0), loc(20, 0), &ring).is_none());
        assert!(engine.last_stats().budget_exhausted);
        assert_eq!(engine.last_stats().nodes_expanded, 500);
    }

    #[test]
    fn test_equal_cost_ties_are_deterministic() {
        let mut engine = AStar::new();
        let path = engine.find_path(loc(0, 0), loc(2, 2), &open_field).unwrap();
        assert_eq!(Route::from_path(&path).to_string(), "EESS");

        let again = engine.find_path(loc(0, 0), loc(2, 2), &open_field).unwrap();
        assert_eq!(path, again);
    }

    #[test]
    fn test_state_does_not_leak_between_calls() {
        let mut engine = AStar::new();
        let wall = |cell: Location| !(cell.x == 1 && (-3..=3).contains(&cell.y));
        engine.find_path(loc(0, 0), loc(2, 0), &wall).unwrap();

        let path = engine.find_path(loc(0, 0), loc(2, 0), &open_field).unwrap();
        assert_eq!(Route::from_path(&path).to_string(), "EE");
        assert_eq!(engine.last_stats().nodes_expanded, 3);
    }
}
