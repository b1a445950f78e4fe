//! Maze session holding the current grid and its active search.

use log::info;

use crate::{
    config::MazeConfig,
    dfs::DepthFirstSearch,
    dijkstra::DijkstraSearch,
    error::MazeError,
    generator::generate_seeded,
    grid::Grid,
    search::{Algorithm, Search, SearchHandle},
};

/// A generated maze together with the handle of the last search started on it.
///
/// Regenerating the maze, or starting another search, first cancels the previous handle. Together
/// with the borrow the returned [`Search`] keeps on the session, this guarantees that no stale
/// search keeps emitting events or touching a grid that has been replaced.
#[derive(Debug)]
pub struct Labyrinth {
    /// Parameters of the current grid.
    config: MazeConfig,
    /// Seed the current grid was generated from.
    seed: u64,
    /// The current grid.
    grid: Grid,
    /// Handle of the last search started, if any.
    active: Option<SearchHandle>,
    /// Number of grids generated by this session so far.
    generation: u64,
}

impl Labyrinth {
    /// Generates a first maze from `config`.
    ///
    /// # Errors
    ///
    /// This function returns the generator's [`MazeError`] when `config` is invalid.
    pub fn generate(config: MazeConfig) -> Result<Self, MazeError> {
        let (grid, seed) = build(&config)?;
        info!("maze 1 generated from seed {seed}");

        Ok(Self {
            config,
            seed,
            grid,
            active: None,
            generation: 1,
        })
    }

    /// Cancels the active search and replaces the grid with one generated from `config`.
    ///
    /// On error the previous grid is kept, but its search stays cancelled.
    ///
    /// # Errors
    ///
    /// This function returns the generator's [`MazeError`] when `config` is invalid.
    pub fn regenerate(&mut self, config: MazeConfig) -> Result<(), MazeError> {
        self.cancel();
        let (grid, seed) = build(&config)?;

        self.config = config;
        self.seed = seed;
        self.grid = grid;
        self.generation += 1;
        info!("maze {} generated from seed {seed}", self.generation);

        Ok(())
    }

    /// Regenerates the maze with the current configuration.
    ///
    /// Without a fixed seed in the configuration the new maze differs from the old one.
    ///
    /// # Errors
    ///
    /// This function returns the generator's [`MazeError`] when the configuration is invalid.
    pub fn reset(&mut self) -> Result<(), MazeError> {
        self.regenerate(self.config)
    }

    /// Cancels the active search, if any. Calling it again has no further effect.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.cancel();
        }
    }

    /// Cancels the active search and starts `algorithm` from the grid's start to its end.
    pub fn search(&mut self, algorithm: Algorithm) -> Search<'_> {
        self.cancel();
        let handle = SearchHandle::new();
        self.active = Some(handle.clone());
        let (start, end) = (self.grid.start(), self.grid.end());

        match algorithm {
            Algorithm::Dfs => Search::DepthFirst(DepthFirstSearch::with_handle(
                &mut self.grid,
                start,
                end,
                handle,
            )),
            Algorithm::Dijkstra => {
                Search::Dijkstra(DijkstraSearch::with_handle(&self.grid, start, end, handle))
            }
        }
    }

    /// The current grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Configuration of the current grid.
    #[must_use]
    pub const fn config(&self) -> &MazeConfig {
        &self.config
    }

    /// Seed the current grid was generated from; reusing it reproduces the grid.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of grids generated by this session, the current one included.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Generates a grid from `config`, drawing a seed when none is fixed.
fn build(config: &MazeConfig) -> Result<(Grid, u64), MazeError> {
    let seed = config.resolve_seed();
    let grid = generate_seeded(
        config.width,
        config.height,
        config.depth,
        config.wall_probability,
        seed,
    )?;

    Ok((grid, seed))
}
