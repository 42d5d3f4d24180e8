use thiserror::Error;

/// Input-validation errors. All of them are recoverable: the caller reports
/// the message and keeps accepting input.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("grid dimensions must be positive integers, got {width} x {height}")]
    InvalidDimension { width: i64, height: i64 },
    #[error("a car named {0} is already registered")]
    DuplicateName(String),
    #[error("position ({x}, {y}) is outside the {width} x {height} grid")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    },
    #[error("car {occupant} already occupies ({x}, {y})")]
    OccupiedStart { x: i64, y: i64, occupant: String },
    #[error("invalid command {command:?} at position {position}, expected L, R or F")]
    InvalidCommand { command: char, position: usize },
}
