//! Error types surfaced by maze construction and the priority queue.

use thiserror::Error;

use crate::coords::Coordinate;

/// Failures raised while building a maze.
///
/// Every variant aborts the construction that produced it; no partially built grid is ever handed
/// back to the caller. An unreachable target is not represented here, as the pathfinders report it
/// through a terminal search event instead.
#[derive(Debug, Error, PartialEq)]
pub enum MazeError {
    /// One of the dimensions is not a positive integer, or the grid volume does not fit in memory.
    #[error("invalid maze dimensions {width}x{height}x{depth}")]
    InvalidDimensions {
        /// Requested extent along the x axis.
        width: i32,
        /// Requested extent along the y axis.
        height: i32,
        /// Requested extent along the z axis.
        depth: i32,
    },
    /// The wall probability is not a real number in `[0, 1]`.
    #[error("wall probability {wall_probability} lies outside [0, 1]")]
    InvalidParameter {
        /// The rejected probability.
        wall_probability: f64,
    },
    /// A start or end coordinate handed to a grid constructor lies outside the grid.
    #[error("coordinate {coordinate} lies outside the grid")]
    OutOfBounds {
        /// The offending coordinate.
        coordinate: Coordinate,
    },
    /// The textual layout of a grid could not be parsed.
    #[error("malformed grid layout at line {line}: {reason}")]
    MalformedLayout {
        /// One-based line number at which parsing stopped.
        line: usize,
        /// Short description of what was wrong with that line.
        reason: &'static str,
    },
}

/// Raised when the minimum is requested from a priority queue that holds no entries.
///
/// The Dijkstra search uses this as its exhaustion signal, so it never reaches a caller of the
/// public search API.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("dequeue from an empty priority queue")]
pub struct EmptyQueueError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maze_error_messages() {
        let dimensions = MazeError::InvalidDimensions {
            width: 0,
            height: 3,
            depth: -1,
        };
        let parameter = MazeError::InvalidParameter {
            wall_probability: 1.5,
        };
        let bounds = MazeError::OutOfBounds {
            coordinate: Coordinate::new(4, 0, 2),
        };

        assert_eq!(dimensions.to_string(), "invalid maze dimensions 0x3x-1");
        assert_eq!(parameter.to_string(), "wall probability 1.5 lies outside [0, 1]");
        assert_eq!(bounds.to_string(), "coordinate (4, 0, 2) lies outside the grid");
    }

    #[test]
    fn test_empty_queue_error_message() {
        assert_eq!(
            EmptyQueueError.to_string(),
            "dequeue from an empty priority queue"
        );
    }
}
