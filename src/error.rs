use crate::grid::Location;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SafePathError {
    // Obstacle construction
    #[error("Sensor range must be greater than 0, got {range}")]
    InvalidRange { range: f64 },

    #[error("Invalid direction '{code}', expected one of n, s, e, w")]
    InvalidDirection { code: char },

    // Map rendering
    #[error("Invalid map specification: top-left {top_left} is not above and left of bottom-right {bottom_right}")]
    InvalidRegion {
        top_left: Location,
        bottom_right: Location,
    },

    // Console input
    #[error("Invalid location '{0}', expected X,Y")]
    InvalidLocation(String),

    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for all fallible operations
pub type Result<T> = std::result::Result<T, SafePathError>;
