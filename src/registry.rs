use crate::algorithms::common::PathSearch;
use crate::grid::{Direction, Location, Route};
use crate::obstacle::{Obstacle, ObstacleKind};
use log::info;

/// Glyph for a cell no obstacle blocks.
pub const CLEAR_GLYPH: char = '.';

/// Every known obstacle, in the order it was reported.
#[derive(Debug, Default, Clone)]
pub struct ObstacleRegistry {
    obstacles: Vec<Obstacle>,
}

impl ObstacleRegistry {
    pub fn new() -> Self {
        ObstacleRegistry::default()
    }

    /// Adds an obstacle. Overlapping or duplicate obstacles are accepted as-is.
    pub fn add(&mut self, obstacle: impl Into<Obstacle>) {
        let obstacle = obstacle.into();
        info!(
            "Registered {:?} at {} ({} obstacles known)",
            obstacle.kind(),
            obstacle.location(),
            self.obstacles.len() + 1
        );
        self.obstacles.push(obstacle);
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// A cell is safe only if every obstacle leaves it passable.
    pub fn is_safe(&self, cell: Location) -> bool {
        self.obstacles.iter().all(|obstacle| obstacle.is_passable(cell))
    }

    /// Display glyph for a cell: the highest-priority kind with any blocking instance.
    pub fn glyph_at(&self, cell: Location) -> char {
        ObstacleKind::RENDER_PRIORITY
            .into_iter()
            .find(|&kind| {
                self.obstacles
                    .iter()
                    .any(|obstacle| obstacle.kind() == kind && !obstacle.is_passable(cell))
            })
            .map_or(CLEAR_GLYPH, ObstacleKind::glyph)
    }

    /// Directions an agent at `current` can step into, in N, S, E, W order.
    pub fn safe_directions(&self, current: Location) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&direction| {
                current
                    .step(direction)
                    .is_some_and(|next| self.is_safe(next))
            })
            .collect()
    }

    /// Shortest safe route from `start` to `goal`, or `None` if there is none.
    pub fn find_safe_path(
        &self,
        engine: &mut dyn PathSearch,
        start: Location,
        goal: Location,
    ) -> Option<Route> {
        let is_safe = |cell: Location| self.is_safe(cell);
        engine
            .find_path(start, goal, &is_safe)
            .map(|path| Route::from_path(&path))
    }
}
