use thiserror::Error;

use crate::maze::{Direction, Point, Size};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MazeError {
    /// Generation settings or a textual enum value could not be accepted.
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    /// A direction argument broke a precondition (e.g. composite flag where a single one is needed).
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("Point {point} is outside the maze bounds {size}")]
    OutOfBounds { point: Point, size: Size },

    #[error("No passage from {point} towards {direction:?}")]
    NoPassage { point: Point, direction: Direction },

    /// The operation is not allowed on this view or in this cursor mode.
    #[error("Unsupported operation: {reason}")]
    Usage { reason: String },

    /// The carved grid breaks an invariant the graph builder relies on.
    #[error("Malformed maze at {point}: {reason}")]
    Malformed { point: Point, reason: String },
}

impl MazeError {
    pub fn config(reason: impl Into<String>) -> Self {
        MazeError::Config {
            reason: reason.into(),
        }
    }

    pub fn usage(reason: impl Into<String>) -> Self {
        MazeError::Usage {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MazeError>;
