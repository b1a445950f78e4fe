//! Textual layout of voxel grids.
//!
//! A grid is written one layer at a time, from `z = 0` upwards, with layers separated by a blank
//! line. Inside a layer each line is one row, from `y = 0` downwards, and each character is one
//! cell, from `x = 0` rightwards:
//!
//! ```text
//! S.#
//! ..#
//!
//! ##E
//! ...
//! ```
//!
//! `#` is a wall, `.` open space, `S` the start and `E` the end. A grid whose start and end
//! coincide prints a single `S` and cannot be parsed back.

use std::{fmt, str::FromStr};

use crate::{
    coords::{Coordinate, Dimensions},
    error::MazeError,
    grid::{CellState, Grid},
};

impl fmt::Display for Grid {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dimensions = self.dimensions();

        for z in 0..dimensions.depth() {
            if z > 0 {
                writeln!(formatter)?;
            }
            for y in 0..dimensions.height() {
                for x in 0..dimensions.width() {
                    let state = self
                        .state(Coordinate::new(x, y, z))
                        .unwrap_or(CellState::Wall);
                    write!(formatter, "{}", state.symbol())?;
                }
                writeln!(formatter)?;
            }
        }

        Ok(())
    }
}

impl FromStr for Grid {
    type Err = MazeError;

    /// Parses the layout written by the [`fmt::Display`] implementation.
    ///
    /// Leading and trailing whitespace on every line is ignored. The layout must contain only
    /// layout characters, rows of equal length, layers of equal height, and exactly one start and
    /// one end cell.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut layers: Vec<Vec<Vec<CellState>>> = Vec::new();
        let mut current: Vec<Vec<CellState>> = Vec::new();
        let mut start = None;
        let mut end = None;
        let mut last_line = 1;

        for (idx, raw) in input.lines().enumerate() {
            let line = idx + 1;
            last_line = line;
            let row = raw.trim();

            if row.is_empty() {
                close_layer(&mut layers, &mut current, line)?;
                continue;
            }

            let mut cells = Vec::with_capacity(row.len());
            for (x, symbol) in row.chars().enumerate() {
                let state = CellState::from_symbol(symbol).ok_or(MazeError::MalformedLayout {
                    line,
                    reason: "unknown cell character",
                })?;
                let coordinate = Coordinate::new(
                    axis(x, line)?,
                    axis(current.len(), line)?,
                    axis(layers.len(), line)?,
                );
                let duplicate = match state {
                    CellState::Start => start
                        .replace(coordinate)
                        .map(|_previous| "more than one start cell"),
                    CellState::End => end
                        .replace(coordinate)
                        .map(|_previous| "more than one end cell"),
                    CellState::Open | CellState::Wall => None,
                };
                if let Some(reason) = duplicate {
                    return Err(MazeError::MalformedLayout { line, reason });
                }
                cells.push(state);
            }

            let expected_width = current
                .first()
                .or_else(|| layers.first().and_then(|layer| layer.first()))
                .map_or(cells.len(), Vec::len);
            if cells.len() != expected_width {
                return Err(MazeError::MalformedLayout {
                    line,
                    reason: "row length differs from the first row",
                });
            }
            current.push(cells);
        }
        close_layer(&mut layers, &mut current, last_line)?;

        let (Some(first_layer), Some(start), Some(end)) = (layers.first(), start, end) else {
            return Err(MazeError::MalformedLayout {
                line: last_line,
                reason: "layout needs at least one row, one start and one end cell",
            });
        };
        let width = first_layer.first().map_or(0, Vec::len);
        let dimensions = Dimensions::new(
            axis(width, last_line)?,
            axis(first_layer.len(), last_line)?,
            axis(layers.len(), last_line)?,
        )?;

        let cells: Vec<CellState> = layers.into_iter().flatten().flatten().collect();
        let mut states = cells.into_iter();

        Grid::from_fn(dimensions, start, end, |_| {
            states.next().unwrap_or(CellState::Wall)
        })
    }
}

/// Moves the rows gathered so far into a finished layer.
///
/// Runs of blank lines are collapsed, and every layer must be as tall as the first one.
fn close_layer(
    layers: &mut Vec<Vec<Vec<CellState>>>,
    current: &mut Vec<Vec<CellState>>,
    line: usize,
) -> Result<(), MazeError> {
    if current.is_empty() {
        return Ok(());
    }
    if layers
        .first()
        .is_some_and(|first| first.len() != current.len())
    {
        return Err(MazeError::MalformedLayout {
            line,
            reason: "layer height differs from the first layer",
        });
    }
    layers.push(std::mem::take(current));

    Ok(())
}

/// Converts a layout position into a coordinate component.
fn axis(value: usize, line: usize) -> Result<i32, MazeError> {
    i32::try_from(value).map_err(|_err| MazeError::MalformedLayout {
        line,
        reason: "layout is too large",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_layers() {
        let grid: Grid = "S.#\n..#\n\n##E\n...\n"
            .parse()
            .expect("layout should parse");
        let dims = grid.dimensions();

        assert_eq!((dims.width(), dims.height(), dims.depth()), (3, 2, 2));
        assert_eq!(grid.start(), Coordinate::new(0, 0, 0));
        assert_eq!(grid.end(), Coordinate::new(2, 0, 1));
        assert_eq!(grid.state(Coordinate::new(2, 1, 0)), Some(CellState::Wall));
        assert_eq!(grid.state(Coordinate::new(1, 1, 1)), Some(CellState::Open));
        assert_eq!(grid.count(CellState::Wall), 4);
    }

    #[test]
    fn test_display_matches_input_layout() {
        let layout = "S.#\n..#\n\n##E\n...\n";
        let grid: Grid = layout.parse().expect("layout should parse");

        assert_eq!(grid.to_string(), layout);
    }

    #[test]
    fn test_parse_tolerates_indentation_and_blank_runs() {
        let grid: Grid = "\n  SE  \n\n\n  ..\n\n"
            .parse()
            .expect("layout should parse");

        assert_eq!(grid.dimensions().depth(), 2);
        assert_eq!(grid.end(), Coordinate::new(1, 0, 0));
    }

    #[test]
    fn test_parse_rejects_unknown_character() {
        assert_eq!(
            "S.x\n..E".parse::<Grid>(),
            Err(MazeError::MalformedLayout {
                line: 1,
                reason: "unknown cell character"
            })
        );
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        assert_eq!(
            "S..\n.E".parse::<Grid>(),
            Err(MazeError::MalformedLayout {
                line: 2,
                reason: "row length differs from the first row"
            })
        );
    }

    #[test]
    fn test_parse_rejects_ragged_layers() {
        assert_eq!(
            "S.\n..\n\n.E\n".parse::<Grid>(),
            Err(MazeError::MalformedLayout {
                line: 4,
                reason: "layer height differs from the first layer"
            })
        );
    }

    #[test]
    fn test_parse_rejects_duplicate_start() {
        assert_eq!(
            "S.\n\nSE".parse::<Grid>(),
            Err(MazeError::MalformedLayout {
                line: 3,
                reason: "more than one start cell"
            })
        );
    }

    #[test]
    fn test_parse_rejects_missing_end() {
        assert!(matches!(
            "S..".parse::<Grid>(),
            Err(MazeError::MalformedLayout { .. })
        ));
        assert!(matches!(
            "".parse::<Grid>(),
            Err(MazeError::MalformedLayout { .. })
        ));
    }
}
