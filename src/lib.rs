pub mod algorithms;
pub mod config;
pub mod error;
pub mod grid;
pub mod map;
pub mod obstacle;
pub mod registry;
pub mod scenario;
pub mod session;
pub mod statistics;

pub use error::{Result, SafePathError};
pub use grid::{Direction, Location, Route};
pub use obstacle::{BottomlessPit, Camera, Fence, Guard, Obstacle, ObstacleKind, Sensor};
pub use registry::ObstacleRegistry;
