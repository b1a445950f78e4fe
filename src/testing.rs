//! Reference helpers shared by the pathfinder tests.

use std::collections::VecDeque;

use proptest::prelude::*;

use crate::{
    coords::{neighbors, Coordinate},
    generator::generate_seeded,
    grid::Grid,
};

/// Breadth-first distance from `start` to `end`, in steps, or `None` when unreachable.
pub(crate) fn bfs_distance(grid: &Grid, start: Coordinate, end: Coordinate) -> Option<usize> {
    if !grid.passable(start) || !grid.passable(end) {
        return None;
    }
    let mut distances = vec![None; grid.dimensions().volume()];
    *distances.get_mut(grid.index(start)?)? = Some(0);
    let mut frontier = VecDeque::from([start]);

    while let Some(current) = frontier.pop_front() {
        let distance = (*distances.get(grid.index(current)?)?)?;
        if current == end {
            return Some(distance);
        }
        for neighbor in neighbors(current) {
            if !grid.passable(neighbor) {
                continue;
            }
            let Some(slot) = grid.index(neighbor).and_then(|idx| distances.get_mut(idx)) else {
                continue;
            };
            if slot.is_none() {
                *slot = Some(distance + 1);
                frontier.push_back(neighbor);
            }
        }
    }

    None
}

/// Small random grids with a wide spread of wall densities.
pub(crate) fn arbitrary_grid() -> impl Strategy<Value = Grid> {
    (1_i32..6, 1_i32..6, 1_i32..4, 0.0_f64..0.7, any::<u64>()).prop_map(
        |(width, height, depth, wall_probability, seed)| {
            generate_seeded(width, height, depth, wall_probability, seed)
                .expect("strategy only yields valid parameters")
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bfs_distance_reference() {
        let grid: Grid = "S.#\n..#\n#.E".parse().expect("layout should parse");

        assert_eq!(bfs_distance(&grid, grid.start(), grid.end()), Some(4));
        assert_eq!(bfs_distance(&grid, grid.start(), grid.start()), Some(0));
        assert_eq!(
            bfs_distance(&grid, grid.start(), Coordinate::new(2, 0, 0)),
            None
        );
    }
}
