use std::fmt;

/// A cell on the unbounded grid. `y` grows southward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    pub const fn new(x: i32, y: i32) -> Self {
        Location { x, y }
    }

    /// Manhattan distance to `other`, the A* heuristic for 4-connected movement.
    pub fn manhattan_distance(&self, other: &Location) -> u64 {
        u64::from(self.x.abs_diff(other.x)) + u64::from(self.y.abs_diff(other.y))
    }

    /// The neighbouring cell one step in `direction`, or `None` at the edge of `i32`.
    pub fn step(&self, direction: Direction) -> Option<Location> {
        let (dx, dy) = direction.offset();
        Some(Location {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// Orthogonal neighbours in the order they are generated for search: E, W, S, N.
    pub fn get_neighbors(&self) -> Vec<Location> {
        [Direction::East, Direction::West, Direction::South, Direction::North]
            .into_iter()
            .filter_map(|direction| self.step(direction))
            .collect()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All four directions in advisory order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub fn code(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
        }
    }

    /// Parses a single direction code, ignoring case.
    pub fn from_code(code: char) -> Option<Direction> {
        match code.to_ascii_lowercase() {
            'n' => Some(Direction::North),
            's' => Some(Direction::South),
            'e' => Some(Direction::East),
            'w' => Some(Direction::West),
            _ => None,
        }
    }

    /// The direction of a single orthogonal step from `from` to `to`.
    pub fn between(from: Location, to: Location) -> Option<Direction> {
        if to.x > from.x {
            Some(Direction::East)
        } else if to.x < from.x {
            Some(Direction::West)
        } else if to.y > from.y {
            Some(Direction::South)
        } else if to.y < from.y {
            Some(Direction::North)
        } else {
            None
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A sequence of cardinal moves. An empty route means "already there".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    steps: Vec<Direction>,
}

impl Route {
    /// Converts a coordinate path (start first) into the moves between consecutive cells.
    pub fn from_path(path: &[Location]) -> Self {
        let steps = path
            .windows(2)
            .filter_map(|pair| Direction::between(pair[0], pair[1]))
            .collect();
        Route { steps }
    }

    pub fn steps(&self) -> &[Direction] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}
