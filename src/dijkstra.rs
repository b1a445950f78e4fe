//! Uniform-cost shortest-path search.
//!
//! Every passable cell enters the queue up front, the start at distance zero and every other cell
//! at [`UNREACHABLE`]. Cells are settled in order of distance, and each settled cell relaxes its
//! passable neighbours through [`MinPriorityQueue::decrease_priority`]. All edges cost one, so the
//! first time the end is settled its distance is final and the predecessor chain spells out a
//! shortest path.

use log::{debug, trace, warn};

use crate::{
    coords::{neighbors, Coordinate},
    grid::Grid,
    queue::MinPriorityQueue,
    search::{SearchEvent, SearchHandle},
};

/// Distance of a cell no path has reached yet.
pub const UNREACHABLE: u32 = u32::MAX;

/// Progress of a Dijkstra search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// Cells are being settled.
    Settling,
    /// The end was settled; the path is reported next.
    Reached,
    /// The terminal event was emitted, or the search was cancelled.
    Finished,
}

/// Lazy Dijkstra search over a grid.
///
/// The grid is only read. Distances, predecessors and the queue are scratch state owned by the
/// search and dropped with it.
#[derive(Debug)]
pub struct DijkstraSearch<'grid> {
    /// The grid being searched.
    grid: &'grid Grid,
    /// Cell the search starts from.
    start: Coordinate,
    /// Cell the search tries to reach.
    end: Coordinate,
    /// Tentative distance of every cell, in storage order.
    distances: Vec<u32>,
    /// Predecessor of every cell on its best known path, in storage order.
    predecessors: Vec<Option<Coordinate>>,
    /// Cells not settled yet, keyed by tentative distance.
    queue: MinPriorityQueue<Coordinate, u32>,
    /// Where the search currently stands.
    phase: Phase,
    /// Cancellation flag shared with the caller.
    handle: SearchHandle,
}

impl<'grid> DijkstraSearch<'grid> {
    /// Prepares a search from `start` to `end` and fills the queue with every passable cell.
    #[must_use]
    pub fn new(grid: &'grid Grid, start: Coordinate, end: Coordinate) -> Self {
        Self::with_handle(grid, start, end, SearchHandle::new())
    }

    /// Prepares a search that stops as soon as `handle` is cancelled.
    #[must_use]
    pub fn with_handle(
        grid: &'grid Grid,
        start: Coordinate,
        end: Coordinate,
        handle: SearchHandle,
    ) -> Self {
        let volume = grid.dimensions().volume();
        let mut distances = vec![UNREACHABLE; volume];
        let mut queue = MinPriorityQueue::with_capacity(volume);

        if let Some(distance) = grid
            .index(start)
            .filter(|_| grid.passable(start))
            .and_then(|idx| distances.get_mut(idx))
        {
            *distance = 0;
        }
        for (coordinate, state) in grid.cells() {
            if state.is_passable() {
                let priority = if coordinate == start { 0 } else { UNREACHABLE };
                queue.enqueue(coordinate, priority);
            }
        }

        Self {
            grid,
            start,
            end,
            distances,
            predecessors: vec![None; volume],
            queue,
            phase: Phase::Settling,
            handle,
        }
    }

    /// Cancellation handle of this search.
    #[must_use]
    pub fn handle(&self) -> SearchHandle {
        self.handle.clone()
    }

    /// Best known distance from the start to `coordinate`.
    ///
    /// Once a cell has been reported through [`SearchEvent::Visiting`] its distance is final.
    #[must_use]
    pub fn distance(&self, coordinate: Coordinate) -> Option<u32> {
        self.grid
            .index(coordinate)
            .and_then(|idx| self.distances.get(idx))
            .copied()
            .filter(|&distance| distance != UNREACHABLE)
    }

    /// Settles the closest remaining cell and relaxes its neighbours.
    fn settle(&mut self) -> SearchEvent {
        let Ok((current, distance)) = self.queue.dequeue_min() else {
            return self.finish_not_found();
        };
        if distance == UNREACHABLE {
            // Only cells cut off from the start remain.
            return self.finish_not_found();
        }

        if current == self.end {
            self.phase = Phase::Reached;
            return SearchEvent::Visiting(current);
        }

        let candidate = distance.saturating_add(1);
        for neighbor in neighbors(current) {
            if !self.grid.passable(neighbor) {
                continue;
            }
            let Some(idx) = self.grid.index(neighbor) else {
                continue;
            };
            let (Some(recorded), Some(predecessor)) =
                (self.distances.get_mut(idx), self.predecessors.get_mut(idx))
            else {
                continue;
            };
            if candidate < *recorded {
                *recorded = candidate;
                *predecessor = Some(current);
                let _ = self.queue.decrease_priority(neighbor, candidate);
            }
        }

        SearchEvent::Visiting(current)
    }

    /// Walks the predecessor chain back from the end and reports the path.
    fn finish_found(&mut self) -> SearchEvent {
        self.phase = Phase::Finished;

        let mut path = vec![self.end];
        let mut current = self.end;
        while current != self.start {
            let Some(previous) = self
                .grid
                .index(current)
                .and_then(|idx| self.predecessors.get(idx))
                .copied()
                .flatten()
            else {
                // The end was settled without a link back to the start.
                return self.finish_not_found();
            };
            path.push(previous);
            current = previous;
        }
        path.reverse();

        debug!(
            "dijkstra search reached {} in {} steps",
            self.end,
            path.len().saturating_sub(1)
        );

        SearchEvent::PathFound(path)
    }

    /// Closes the stream without a path.
    fn finish_not_found(&mut self) -> SearchEvent {
        self.phase = Phase::Finished;
        self.queue.clear();
        debug!(
            "dijkstra search found no path from {} to {}",
            self.start, self.end
        );

        SearchEvent::NotFound
    }
}

impl Iterator for DijkstraSearch<'_> {
    type Item = SearchEvent;

    fn next(&mut self) -> Option<Self::Item> {
        if self.phase != Phase::Finished && self.handle.is_cancelled() {
            warn!("dijkstra search from {} cancelled", self.start);
            self.queue.clear();
            self.phase = Phase::Finished;
        }

        let event = match self.phase {
            Phase::Settling => self.settle(),
            Phase::Reached => self.finish_found(),
            Phase::Finished => return None,
        };
        trace!("dijkstra search: {event}");

        Some(event)
    }
}

/// Starts a Dijkstra search from `start` to `end` over `grid`.
#[must_use]
pub fn run_dijkstra(grid: &Grid, start: Coordinate, end: Coordinate) -> DijkstraSearch<'_> {
    DijkstraSearch::new(grid, start, end)
}
