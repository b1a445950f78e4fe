//! Maze configuration.

use rand::Rng as _;

use crate::{coords::Dimensions, error::MazeError, generator::check_wall_probability};

/// Default extent along each axis.
pub const DEFAULT_SIDE: i32 = 9;

/// Default probability for a cell to become a wall.
pub const DEFAULT_WALL_PROBABILITY: f64 = 0.2;

/// Parameters of a maze generation.
///
/// The values are handed to the generator untouched; they are only checked when a maze is built,
/// so an invalid configuration can be held and inspected without error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MazeConfig {
    /// Extent along x.
    pub width: i32,
    /// Extent along y.
    pub height: i32,
    /// Extent along z.
    pub depth: i32,
    /// Probability in `[0, 1]` for each cell to be a wall.
    pub wall_probability: f64,
    /// Seed of the generator. A fresh one is drawn for every generation when unset.
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIDE,
            height: DEFAULT_SIDE,
            depth: DEFAULT_SIDE,
            wall_probability: DEFAULT_WALL_PROBABILITY,
            seed: None,
        }
    }
}

impl MazeConfig {
    /// Checks the configuration without generating anything.
    ///
    /// # Errors
    ///
    /// This function returns the same errors as [`generate`](crate::generate) would.
    pub fn validate(&self) -> Result<Dimensions, MazeError> {
        let dimensions = Dimensions::new(self.width, self.height, self.depth)?;
        check_wall_probability(self.wall_probability)?;

        Ok(dimensions)
    }

    /// Seed to use for the next generation: the configured one, or a freshly drawn one.
    #[must_use]
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::thread_rng().gen())
    }
}
