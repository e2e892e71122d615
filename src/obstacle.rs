//! Obstacle shapes and their passability rules.
//!
//! Every shape answers one question: does it leave a given cell passable?
//! Arguments are validated when the obstacle is built, so queries never fail.

use crate::error::{Result, SafePathError};
use crate::grid::{Direction, Location};

/// Variant tag, carrying the display glyph and render priority of each shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    Guard,
    Fence,
    Sensor,
    Camera,
    BottomlessPit,
}

impl ObstacleKind {
    /// Render priority, highest first. Only used to pick a glyph for overlapping obstacles.
    pub const RENDER_PRIORITY: [ObstacleKind; 5] = [
        ObstacleKind::Guard,
        ObstacleKind::Fence,
        ObstacleKind::Sensor,
        ObstacleKind::Camera,
        ObstacleKind::BottomlessPit,
    ];

    pub fn glyph(self) -> char {
        match self {
            ObstacleKind::Guard => 'g',
            ObstacleKind::Fence => 'f',
            ObstacleKind::Sensor => 's',
            ObstacleKind::Camera => 'c',
            ObstacleKind::BottomlessPit => 'b',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Guard {
    location: Location,
}

impl Guard {
    pub fn new(location: Location) -> Self {
        Guard { location }
    }

    pub fn is_passable(&self, cell: Location) -> bool {
        cell != self.location
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fence {
    start: Location,
    end: Location,
}

impl Fence {
    pub fn new(start: Location, end: Location) -> Self {
        Fence { start, end }
    }

    pub fn end(&self) -> Location {
        self.end
    }

    /// Blocks the column through `start` between the two y values, and the row
    /// through `start` between the two x values. Endpoints are inclusive.
    pub fn is_passable(&self, cell: Location) -> bool {
        let on_column = cell.x == self.start.x && within(cell.y, self.start.y, self.end.y);
        let on_row = cell.y == self.start.y && within(cell.x, self.start.x, self.end.x);
        !(on_column || on_row)
    }
}

fn within(value: i32, a: i32, b: i32) -> bool {
    a.min(b) <= value && value <= a.max(b)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sensor {
    location: Location,
    range: f64,
}

impl Sensor {
    /// Fails with `InvalidRange` unless `range` is a positive number.
    pub fn new(location: Location, range: f64) -> Result<Self> {
        if range.is_nan() || range <= 0.0 {
            return Err(SafePathError::InvalidRange { range });
        }
        Ok(Sensor { location, range })
    }

    pub fn range(&self) -> f64 {
        self.range
    }

    pub fn is_passable(&self, cell: Location) -> bool {
        let dx = f64::from(cell.x) - f64::from(self.location.x);
        let dy = f64::from(cell.y) - f64::from(self.location.y);
        dx.hypot(dy) > self.range
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    location: Location,
    facing: Direction,
}

impl Camera {
    pub fn new(location: Location, facing: Direction) -> Self {
        Camera { location, facing }
    }

    /// Builds a camera from a direction code (n, s, e or w, any case).
    pub fn from_code(location: Location, code: char) -> Result<Self> {
        let facing = Direction::from_code(code).ok_or(SafePathError::InvalidDirection { code })?;
        Ok(Camera::new(location, facing))
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn is_passable(&self, cell: Location) -> bool {
        cell != self.location && !self.in_view(cell)
    }

    // A 90 degree wedge: ahead of the camera, no further sideways than forward.
    fn in_view(&self, cell: Location) -> bool {
        let dx = i64::from(cell.x) - i64::from(self.location.x);
        let dy = i64::from(cell.y) - i64::from(self.location.y);
        let (forward, sideways) = match self.facing {
            Direction::North => (-dy, dx),
            Direction::South => (dy, dx),
            Direction::East => (dx, dy),
            Direction::West => (-dx, dy),
        };
        forward > 0 && sideways.abs() <= forward
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BottomlessPit {
    location: Location,
}

impl BottomlessPit {
    pub fn new(location: Location) -> Self {
        BottomlessPit { location }
    }

    /// Blocks the 3x3 block centred on the pit.
    pub fn is_passable(&self, cell: Location) -> bool {
        self.location.x.abs_diff(cell.x) > 1 || self.location.y.abs_diff(cell.y) > 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Obstacle {
    Guard(Guard),
    Fence(Fence),
    Sensor(Sensor),
    Camera(Camera),
    BottomlessPit(BottomlessPit),
}

impl Obstacle {
    pub fn kind(&self) -> ObstacleKind {
        match self {
            Obstacle::Guard(_) => ObstacleKind::Guard,
            Obstacle::Fence(_) => ObstacleKind::Fence,
            Obstacle::Sensor(_) => ObstacleKind::Sensor,
            Obstacle::Camera(_) => ObstacleKind::Camera,
            Obstacle::BottomlessPit(_) => ObstacleKind::BottomlessPit,
        }
    }

    /// The anchor cell. For a fence this is its start point.
    pub fn location(&self) -> Location {
        match self {
            Obstacle::Guard(guard) => guard.location,
            Obstacle::Fence(fence) => fence.start,
            Obstacle::Sensor(sensor) => sensor.location,
            Obstacle::Camera(camera) => camera.location,
            Obstacle::BottomlessPit(pit) => pit.location,
        }
    }

    pub fn is_passable(&self, cell: Location) -> bool {
        match self {
            Obstacle::Guard(guard) => guard.is_passable(cell),
            Obstacle::Fence(fence) => fence.is_passable(cell),
            Obstacle::Sensor(sensor) => sensor.is_passable(cell),
            Obstacle::Camera(camera) => camera.is_passable(cell),
            Obstacle::BottomlessPit(pit) => pit.is_passable(cell),
        }
    }
}

impl From<Guard> for Obstacle {
    fn from(guard: Guard) -> Self {
        Obstacle::Guard(guard)
    }
}

impl From<Fence> for Obstacle {
    fn from(fence: Fence) -> Self {
        Obstacle::Fence(fence)
    }
}

impl From<Sensor> for Obstacle {
    fn from(sensor: Sensor) -> Self {
        Obstacle::Sensor(sensor)
    }
}

impl From<Camera> for Obstacle {
    fn from(camera: Camera) -> Self {
        Obstacle::Camera(camera)
    }
}

impl From<BottomlessPit> for Obstacle {
    fn from(pit: BottomlessPit) -> Self {
        Obstacle::BottomlessPit(pit)
    }
}
