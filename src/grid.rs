//! Voxel grid module.
//!
//! This module contains the `Grid` struct, which owns the dense cell storage of a maze along with
//! its start and end coordinates, and the transient visited marks the depth-first search leaves on
//! the cells of its current branch.

use crate::{
    coords::{Coordinate, Dimensions},
    error::MazeError,
};

/// Content of a single voxel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Traversable empty space.
    Open,
    /// Blocking cell; never part of a path.
    Wall,
    /// The cell searches start from.
    Start,
    /// The cell searches try to reach.
    End,
}

impl CellState {
    /// Character used for this state in the textual grid layout.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Open => '.',
            Self::Wall => '#',
            Self::Start => 'S',
            Self::End => 'E',
        }
    }

    /// Parses a layout character back into a cell state.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Self::Open),
            '#' => Some(Self::Wall),
            'S' => Some(Self::Start),
            'E' => Some(Self::End),
            _ => None,
        }
    }

    /// Whether a search may step onto a cell in this state.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// Dense three-dimensional maze.
///
/// The grid always holds exactly one start and one end coordinate and neither is ever a wall. When
/// both coincide the shared cell reads as [`CellState::Start`] while [`Grid::end`] still returns the
/// same coordinate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Extent of the grid.
    dimensions: Dimensions,
    /// Cell states in storage order.
    cells: Vec<CellState>,
    /// Visited marks left by an in-flight depth-first search, in storage order.
    visited: Vec<bool>,
    /// Coordinate searches start from.
    start: Coordinate,
    /// Coordinate searches try to reach.
    end: Coordinate,
}

impl Grid {
    /// Builds a grid without walls.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::OutOfBounds`] if `start` or `end` lies outside
    /// `dimensions`.
    pub fn open(
        dimensions: Dimensions,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<Self, MazeError> {
        Self::from_fn(dimensions, start, end, |_| CellState::Open)
    }

    /// Builds a grid by asking `state_at` for the state of every coordinate in storage order.
    ///
    /// Whatever `state_at` returns for `start` and `end` is overwritten, so the endpoints are never
    /// walls. Any other start or end state it returns is downgraded to [`CellState::Open`].
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::OutOfBounds`] if `start` or `end` lies outside
    /// `dimensions`.
    pub fn from_fn<F>(
        dimensions: Dimensions,
        start: Coordinate,
        end: Coordinate,
        mut state_at: F,
    ) -> Result<Self, MazeError>
    where
        F: FnMut(Coordinate) -> CellState,
    {
        for coordinate in [start, end] {
            if !dimensions.contains(coordinate) {
                return Err(MazeError::OutOfBounds { coordinate });
            }
        }

        let cells = dimensions
            .coordinates()
            .map(|coordinate| match state_at(coordinate) {
                CellState::Wall => CellState::Wall,
                CellState::Open | CellState::Start | CellState::End => CellState::Open,
            })
            .collect();

        let mut grid = Self {
            dimensions,
            cells,
            visited: vec![false; dimensions.volume()],
            start,
            end,
        };
        grid.put(end, CellState::End);
        grid.put(start, CellState::Start);

        Ok(grid)
    }

    /// Extent of the grid.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Coordinate searches start from.
    #[must_use]
    pub const fn start(&self) -> Coordinate {
        self.start
    }

    /// Coordinate searches try to reach.
    #[must_use]
    pub const fn end(&self) -> Coordinate {
        self.end
    }

    /// State of the cell at `coordinate`, or `None` when it lies outside the grid.
    #[must_use]
    pub fn state(&self, coordinate: Coordinate) -> Option<CellState> {
        self.index(coordinate)
            .and_then(|idx| self.cells.get(idx))
            .copied()
    }

    /// Whether `coordinate` is inside the grid and not a wall.
    #[must_use]
    pub fn passable(&self, coordinate: Coordinate) -> bool {
        self.state(coordinate).is_some_and(CellState::is_passable)
    }

    /// Turns the cell at `coordinate` into a wall or back into open space.
    ///
    /// Returns `false` and leaves the grid untouched when the coordinate is outside the grid or is
    /// the start or end cell.
    pub fn set_wall(&mut self, coordinate: Coordinate, wall: bool) -> bool {
        if coordinate == self.start || coordinate == self.end || self.index(coordinate).is_none() {
            return false;
        }
        let state = if wall {
            CellState::Wall
        } else {
            CellState::Open
        };
        self.put(coordinate, state);

        true
    }

    /// Whether the depth-first search currently holds `coordinate` on its tentative branch.
    #[must_use]
    pub fn is_visited(&self, coordinate: Coordinate) -> bool {
        self.index(coordinate)
            .and_then(|idx| self.visited.get(idx))
            .copied()
            .unwrap_or(false)
    }

    /// Number of cells currently marked as visited.
    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|&&visited| visited).count()
    }

    /// Number of cells holding `state`.
    #[must_use]
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    /// Iterates every cell with its coordinate, in storage order.
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, CellState)> + '_ {
        self.dimensions.coordinates().zip(self.cells.iter().copied())
    }

    /// Sets or clears the visited mark of `coordinate`. Out-of-bounds coordinates are ignored.
    pub(crate) fn mark_visited(&mut self, coordinate: Coordinate, visited: bool) {
        if let Some(mark) = self
            .index(coordinate)
            .and_then(|idx| self.visited.get_mut(idx))
        {
            *mark = visited;
        }
    }

    /// Dense storage index of `coordinate`.
    pub(crate) fn index(&self, coordinate: Coordinate) -> Option<usize> {
        self.dimensions.index(coordinate)
    }

    /// Writes a cell state without checking the start/end invariant.
    fn put(&mut self, coordinate: Coordinate, state: CellState) {
        if let Some(cell) = self
            .dimensions
            .index(coordinate)
            .and_then(|idx| self.cells.get_mut(idx))
        {
            *cell = state;
        }
    }
}
