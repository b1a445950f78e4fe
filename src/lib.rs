//! Random 3D voxel mazes and two pathfinders that search them one observable step at a time.
//!
//! A maze is a [`Grid`] of cells that are open, walls, the start or the end. [`generate`] fills a
//! grid at random; [`run_dfs`] and [`run_dijkstra`] return lazy [`SearchEvent`] streams that a
//! renderer, a test or the command line front end can drain at its own pace. [`Labyrinth`] ties a
//! grid to its active search so that regenerating the maze always cancels the search in flight.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod cli;
mod config;
mod coords;
mod dfs;
mod dijkstra;
mod error;
mod generator;
mod grid;
mod labyrinth;
mod layout;
mod queue;
mod search;
#[cfg(test)]
mod testing;

pub use cli::{run, run_with, Cli};
pub use config::{MazeConfig, DEFAULT_SIDE, DEFAULT_WALL_PROBABILITY};
pub use coords::{in_bounds, neighbors, Coordinate, Dimensions, DIRECTIONS};
pub use dfs::{run_dfs, DepthFirstSearch};
pub use dijkstra::{run_dijkstra, DijkstraSearch, UNREACHABLE};
pub use error::{EmptyQueueError, MazeError};
pub use generator::{generate, generate_seeded};
pub use grid::{CellState, Grid};
pub use labyrinth::Labyrinth;
pub use queue::MinPriorityQueue;
pub use search::{cancel, Algorithm, Search, SearchEvent, SearchHandle, SearchReport};
