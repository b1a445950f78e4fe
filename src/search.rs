//! Search events, cancellation and result collection shared by both pathfinders.
//!
//! A search is an [`Iterator`] of [`SearchEvent`]s. Each call to `next` advances the underlying
//! algorithm by exactly one observable step, so the consumer decides the pacing: a renderer can
//! draw a frame between two events, a test can collect them all at once. A finished stream always
//! ends with exactly one terminal event, [`SearchEvent::PathFound`] or [`SearchEvent::NotFound`],
//! unless the search was cancelled through its [`SearchHandle`].

use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use clap::ValueEnum;

use crate::{
    coords::Coordinate,
    dfs::DepthFirstSearch,
    dijkstra::DijkstraSearch,
};

/// One observable step of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchEvent {
    /// A cell is being examined (depth-first) or settled (Dijkstra).
    Visiting(Coordinate),
    /// The depth-first search abandoned a cell whose every branch failed.
    ///
    /// A renderer can use this to retract the tentative path segment it drew for that cell.
    Backtracking(Coordinate),
    /// The end was reached; the path runs from start to end inclusive.
    PathFound(Vec<Coordinate>),
    /// The end cannot be reached from the start.
    NotFound,
}

impl SearchEvent {
    /// Whether this event closes the stream.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::PathFound(_) | Self::NotFound)
    }
}

impl fmt::Display for SearchEvent {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visiting(coordinate) => write!(formatter, "visit {coordinate}"),
            Self::Backtracking(coordinate) => write!(formatter, "backtrack {coordinate}"),
            Self::PathFound(path) => write!(
                formatter,
                "path found: {} steps through {} cells",
                path.len().saturating_sub(1),
                path.len()
            ),
            Self::NotFound => write!(formatter, "no path"),
        }
    }
}

/// Cancellation handle of an in-flight search.
///
/// Clones share the same flag, so a handle can be given away (to another thread, to a UI callback)
/// while the search itself keeps running. Cancelling is idempotent. A cancelled search yields no
/// further event from its next `next` call onwards and releases any mark it left on the grid.
#[derive(Clone, Debug, Default)]
pub struct SearchHandle {
    /// Flag shared by every clone of the handle.
    cancelled: Arc<AtomicBool>,
}

impl SearchHandle {
    /// Creates a live handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops the search this handle belongs to.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether [`SearchHandle::cancel`] was called on this handle or one of its clones.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Stops the search behind `handle`. Calling it more than once has no further effect.
pub fn cancel(handle: &SearchHandle) {
    handle.cancel();
}

/// Search algorithm selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Backtracking depth-first search; reports the first path found, not the shortest.
    Dfs,
    /// Uniform-cost search; reports a shortest path.
    #[default]
    Dijkstra,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Dfs => "dfs",
            Self::Dijkstra => "dijkstra",
        })
    }
}

/// A search of either kind, driven as a single event stream.
#[derive(Debug)]
pub enum Search<'grid> {
    /// A depth-first search.
    DepthFirst(DepthFirstSearch<'grid>),
    /// A Dijkstra search.
    Dijkstra(DijkstraSearch<'grid>),
}

impl Search<'_> {
    /// Cancellation handle of the underlying search.
    #[must_use]
    pub fn handle(&self) -> SearchHandle {
        match self {
            Self::DepthFirst(search) => search.handle(),
            Self::Dijkstra(search) => search.handle(),
        }
    }
}

impl Iterator for Search<'_> {
    type Item = SearchEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::DepthFirst(search) => search.next(),
            Self::Dijkstra(search) => search.next(),
        }
    }
}

/// Everything a finished event stream said, gathered in one place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchReport {
    /// Cells in the order they were visited.
    pub visited: Vec<Coordinate>,
    /// Cells in the order they were backtracked out of.
    pub backtracked: Vec<Coordinate>,
    /// The path from start to end, if one was found.
    pub path: Option<Vec<Coordinate>>,
    /// Whether the stream ended with a terminal event.
    pub completed: bool,
}

impl SearchReport {
    /// Drains `events` into a report.
    ///
    /// Events after the first terminal one are ignored.
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = SearchEvent>,
    {
        let mut report = Self::default();

        for event in events {
            match event {
                SearchEvent::Visiting(coordinate) => report.visited.push(coordinate),
                SearchEvent::Backtracking(coordinate) => report.backtracked.push(coordinate),
                SearchEvent::PathFound(path) => {
                    report.path = Some(path);
                    report.completed = true;
                    break;
                }
                SearchEvent::NotFound => {
                    report.completed = true;
                    break;
                }
            }
        }

        report
    }

    /// Whether a path was found.
    #[must_use]
    pub const fn found(&self) -> bool {
        self.path.is_some()
    }

    /// Number of steps (edges) in the found path.
    #[must_use]
    pub fn path_length(&self) -> Option<usize> {
        self.path
            .as_ref()
            .map(|path| path.len().saturating_sub(1))
    }
}
