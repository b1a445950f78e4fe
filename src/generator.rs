//! Random maze generation.
//!
//! Every cell is an independent Bernoulli trial: it becomes a wall when a uniform draw in `[0, 1)`
//! falls below the wall probability. The start and end cells are drawn uniformly over the whole
//! grid and always override whatever wall roll landed on them. Nothing guarantees that the end is
//! reachable from the start; detecting that is the pathfinders' job.

use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng as _};

use crate::{
    coords::{Coordinate, Dimensions},
    error::MazeError,
    grid::{CellState, Grid},
};

/// Generates a random maze using `rng` as the only source of randomness.
///
/// The start coordinate is drawn first, then the end coordinate, then one value per cell in
/// storage order. Feeding the same seeded generator therefore always yields the same grid.
///
/// # Errors
///
/// This function returns:
/// - [`MazeError::InvalidDimensions`] if a dimension is not positive or the grid is too large.
/// - [`MazeError::InvalidParameter`] if `wall_probability` is not a number in `[0, 1]`.
pub fn generate<R>(
    width: i32,
    height: i32,
    depth: i32,
    wall_probability: f64,
    rng: &mut R,
) -> Result<Grid, MazeError>
where
    R: Rng + ?Sized,
{
    let dimensions = Dimensions::new(width, height, depth)?;
    check_wall_probability(wall_probability)?;

    let start = random_coordinate(dimensions, rng);
    let end = random_coordinate(dimensions, rng);
    let grid = Grid::from_fn(dimensions, start, end, |_| {
        if rng.gen::<f64>() < wall_probability {
            CellState::Wall
        } else {
            CellState::Open
        }
    })?;

    debug!(
        "generated {dimensions} maze with {} walls, start {start}, end {end}",
        grid.count(CellState::Wall)
    );

    Ok(grid)
}

/// Generates a random maze from a `u64` seed.
///
/// Two calls with the same arguments produce identical grids.
///
/// # Errors
///
/// This function fails under the same conditions as [`generate`].
pub fn generate_seeded(
    width: i32,
    height: i32,
    depth: i32,
    wall_probability: f64,
    seed: u64,
) -> Result<Grid, MazeError> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(width, height, depth, wall_probability, &mut rng)
}

/// Rejects wall probabilities outside `[0, 1]`, NaN included.
pub(crate) fn check_wall_probability(wall_probability: f64) -> Result<(), MazeError> {
    if (0.0..=1.0).contains(&wall_probability) {
        Ok(())
    } else {
        Err(MazeError::InvalidParameter { wall_probability })
    }
}

/// Draws a coordinate uniformly over `dimensions`, each component independently.
fn random_coordinate<R>(dimensions: Dimensions, rng: &mut R) -> Coordinate
where
    R: Rng + ?Sized,
{
    Coordinate::new(
        rng.gen_range(0..dimensions.width()),
        rng.gen_range(0..dimensions.height()),
        rng.gen_range(0..dimensions.depth()),
    )
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_generate_rejects_bad_dimensions() {
        assert_eq!(
            generate_seeded(0, 3, 3, 0.2, 1),
            Err(MazeError::InvalidDimensions {
                width: 0,
                height: 3,
                depth: 3
            })
        );
        assert_eq!(
            generate_seeded(3, 3, -4, 0.2, 1),
            Err(MazeError::InvalidDimensions {
                width: 3,
                height: 3,
                depth: -4
            })
        );
    }

    #[test]
    fn test_generate_rejects_bad_probability() {
        assert_eq!(
            generate_seeded(3, 3, 3, 1.01, 1),
            Err(MazeError::InvalidParameter {
                wall_probability: 1.01
            })
        );
        assert_eq!(
            generate_seeded(3, 3, 3, -0.5, 1),
            Err(MazeError::InvalidParameter {
                wall_probability: -0.5
            })
        );
        assert!(matches!(
            generate_seeded(3, 3, 3, f64::NAN, 1),
            Err(MazeError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_same_seed_same_grid() {
        let first = generate_seeded(9, 9, 9, 0.2, 42).expect("parameters are valid");
        let second = generate_seeded(9, 9, 9, 0.2, 42).expect("parameters are valid");

        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn test_zero_probability_has_no_walls() {
        let grid = generate_seeded(5, 4, 3, 0.0, 7).expect("parameters are valid");

        assert_eq!(grid.count(CellState::Wall), 0);
    }

    #[test]
    fn test_full_probability_walls_everything_but_endpoints() {
        let grid = generate_seeded(5, 4, 3, 1.0, 7).expect("parameters are valid");
        let endpoints = if grid.start() == grid.end() { 1 } else { 2 };

        assert_eq!(grid.count(CellState::Wall), 60 - endpoints);
        assert!(grid.passable(grid.start()));
        assert!(grid.passable(grid.end()));
    }

    #[test]
    fn test_single_cell_grid_shares_start_and_end() {
        let grid = generate_seeded(1, 1, 1, 1.0, 3).expect("parameters are valid");

        assert_eq!(grid.start(), Coordinate::new(0, 0, 0));
        assert_eq!(grid.end(), Coordinate::new(0, 0, 0));
        assert_eq!(grid.state(grid.start()), Some(CellState::Start));
    }

    proptest! {
        #[test]
        fn test_generated_grid_shape(
            width in 1_i32..7,
            height in 1_i32..7,
            depth in 1_i32..7,
            wall_probability in 0.0_f64..=1.0,
            seed in any::<u64>(),
        ) {
            let grid = generate_seeded(width, height, depth, wall_probability, seed)
                .expect("parameters are valid");
            let dims = grid.dimensions();

            prop_assert_eq!((dims.width(), dims.height(), dims.depth()), (width, height, depth));
            prop_assert_eq!(grid.count(CellState::Start), 1);
            if grid.start() == grid.end() {
                prop_assert_eq!(grid.count(CellState::End), 0);
            } else {
                prop_assert_eq!(grid.count(CellState::End), 1);
                prop_assert_eq!(grid.state(grid.end()), Some(CellState::End));
            }
            prop_assert_eq!(grid.state(grid.start()), Some(CellState::Start));
            prop_assert_eq!(grid.cells().count(), dims.volume());
            prop_assert_eq!(grid.visited_count(), 0);
        }
    }
}
