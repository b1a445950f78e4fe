//! Backtracking depth-first pathfinder.
//!
//! This module contains the depth-first search and the frame stack it runs on. The search walks
//! the six neighbours of a cell in the fixed order of [`neighbors`](crate::coords::neighbors),
//! descends into the first one it may enter and only comes back once that branch failed. It
//! therefore reports the first path it stumbles upon, which need not be the shortest.
//!
//! The cells of the branch currently being explored are marked as visited on the grid itself, and
//! each mark is lifted again as the search backtracks out of a cell. Independently, every cell is
//! expanded at most once per run, which bounds the search by the number of cells.

use log::{debug, trace, warn};

use crate::{
    coords::{neighbors, Coordinate},
    grid::Grid,
    search::{SearchEvent, SearchHandle},
};

/// One cell on the explicit recursion stack.
#[derive(Clone, Copy, Debug)]
struct Frame {
    /// Cell this frame explores.
    at: Coordinate,
    /// Index of the next neighbour direction to try.
    next_direction: usize,
}

/// Progress of a depth-first search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// Nothing emitted yet; the search still has to enter its start cell.
    Pending,
    /// Frames are being expanded.
    Exploring,
    /// The top frame sits on the end cell; the path is reported next.
    Reached,
    /// The terminal event was emitted, or the search was cancelled.
    Finished,
}

/// Lazy depth-first search over a grid.
///
/// The search borrows the grid mutably for its whole lifetime because it marks the cells of its
/// current branch as visited. Those marks are lifted when the search completes, is cancelled or is
/// dropped, so the grid always returns to the state it had before the search started.
#[derive(Debug)]
pub struct DepthFirstSearch<'grid> {
    /// The grid being searched.
    grid: &'grid mut Grid,
    /// Cell the search starts from.
    start: Coordinate,
    /// Cell the search tries to reach.
    end: Coordinate,
    /// Explicit recursion stack; bottom to top is the tentative path.
    stack: Vec<Frame>,
    /// Cells already entered during this run, in storage order.
    explored: Vec<bool>,
    /// Where the search currently stands.
    phase: Phase,
    /// Cancellation flag shared with the caller.
    handle: SearchHandle,
}

impl<'grid> DepthFirstSearch<'grid> {
    /// Prepares a search from `start` to `end`. No work happens until the first event is pulled.
    #[must_use]
    pub fn new(grid: &'grid mut Grid, start: Coordinate, end: Coordinate) -> Self {
        Self::with_handle(grid, start, end, SearchHandle::new())
    }

    /// Prepares a search that stops as soon as `handle` is cancelled.
    #[must_use]
    pub fn with_handle(
        grid: &'grid mut Grid,
        start: Coordinate,
        end: Coordinate,
        handle: SearchHandle,
    ) -> Self {
        let volume = grid.dimensions().volume();

        Self {
            grid,
            start,
            end,
            stack: Vec::new(),
            explored: vec![false; volume],
            phase: Phase::Pending,
            handle,
        }
    }

    /// Cancellation handle of this search.
    #[must_use]
    pub fn handle(&self) -> SearchHandle {
        self.handle.clone()
    }

    /// Tries to push a frame for `coordinate`.
    ///
    /// Fails without side effects when the cell is outside the grid, a wall, or was already
    /// entered during this run.
    fn enter(&mut self, coordinate: Coordinate) -> bool {
        if !self.grid.passable(coordinate) {
            return false;
        }
        let Some(explored) = self
            .grid
            .index(coordinate)
            .and_then(|idx| self.explored.get_mut(idx))
        else {
            return false;
        };
        if *explored {
            return false;
        }
        *explored = true;

        self.grid.mark_visited(coordinate, true);
        self.stack.push(Frame {
            at: coordinate,
            next_direction: 0,
        });
        if coordinate == self.end {
            self.phase = Phase::Reached;
        }

        true
    }

    /// Advances the top frame by one step.
    ///
    /// Either a neighbour is entered, the exhausted top frame is popped, or the stack turns out to
    /// be empty and the search has failed.
    fn step(&mut self) -> SearchEvent {
        loop {
            let Some(frame) = self.stack.last_mut() else {
                self.phase = Phase::Finished;
                debug!("depth-first search found no path from {}", self.start);
                return SearchEvent::NotFound;
            };
            let at = frame.at;

            let Some(&neighbor) = neighbors(at).get(frame.next_direction) else {
                let _ = self.stack.pop();
                self.grid.mark_visited(at, false);
                return SearchEvent::Backtracking(at);
            };
            frame.next_direction += 1;

            if self.enter(neighbor) {
                return SearchEvent::Visiting(neighbor);
            }
        }
    }

    /// Reports the path held by the stack and lifts its visited marks.
    fn finish_found(&mut self) -> SearchEvent {
        let path: Vec<Coordinate> = self.stack.iter().map(|frame| frame.at).collect();
        self.release();
        self.phase = Phase::Finished;
        debug!(
            "depth-first search reached {} in {} steps",
            self.end,
            path.len().saturating_sub(1)
        );

        SearchEvent::PathFound(path)
    }

    /// Lifts the visited marks of every frame still on the stack.
    fn release(&mut self) {
        for frame in self.stack.drain(..) {
            self.grid.mark_visited(frame.at, false);
        }
    }
}

impl Iterator for DepthFirstSearch<'_> {
    type Item = SearchEvent;

    fn next(&mut self) -> Option<Self::Item> {
        if self.phase != Phase::Finished && self.handle.is_cancelled() {
            warn!("depth-first search from {} cancelled", self.start);
            self.release();
            self.phase = Phase::Finished;
        }

        let event = match self.phase {
            Phase::Pending => {
                self.phase = Phase::Exploring;
                if self.enter(self.start) {
                    SearchEvent::Visiting(self.start)
                } else {
                    self.phase = Phase::Finished;
                    SearchEvent::NotFound
                }
            }
            Phase::Exploring => self.step(),
            Phase::Reached => self.finish_found(),
            Phase::Finished => return None,
        };
        trace!("depth-first search: {event}");

        Some(event)
    }
}

impl Drop for DepthFirstSearch<'_> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Starts a depth-first search from `start` to `end` over `grid`.
#[must_use]
pub fn run_dfs(grid: &mut Grid, start: Coordinate, end: Coordinate) -> DepthFirstSearch<'_> {
    DepthFirstSearch::new(grid, start, end)
}
