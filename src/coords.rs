//! Coordinate space module.
//!
//! This module contains the integer coordinates used to address voxels, the validated dimensions of
//! a grid, and the bounds and adjacency rules shared by the generator and both pathfinders.

use std::fmt;

use crate::error::MazeError;

/// Offsets of the six axis-aligned neighbours, in the order the pathfinders try them.
///
/// The order is (-x, +x, -y, +y, -z, +z). The depth-first search returns the first path it finds
/// under this order, so changing it changes which path is reported.
pub const DIRECTIONS: [Coordinate; 6] = [
    Coordinate::new(-1, 0, 0),
    Coordinate::new(1, 0, 0),
    Coordinate::new(0, -1, 0),
    Coordinate::new(0, 1, 0),
    Coordinate::new(0, 0, -1),
    Coordinate::new(0, 0, 1),
];

/// Integer position of a voxel.
///
/// Components are signed so that the neighbours of a border cell can be expressed and then
/// rejected by a bounds check. Equality and ordering follow the `(x, y, z)` tuple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    /// Position along the width of the grid.
    pub x: i32,
    /// Position along the height of the grid.
    pub y: i32,
    /// Position along the depth of the grid.
    pub z: i32,
}

impl Coordinate {
    /// Builds a coordinate from its three components.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns the coordinate displaced by `offset`.
    ///
    /// Components saturate instead of overflowing. A saturated component always lies outside any
    /// grid, so bounds checks keep rejecting it.
    #[must_use]
    pub const fn offset(self, offset: Self) -> Self {
        Self {
            x: self.x.saturating_add(offset.x),
            y: self.y.saturating_add(offset.y),
            z: self.z.saturating_add(offset.z),
        }
    }
}

impl From<(i32, i32, i32)> for Coordinate {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Returns the six neighbours of `coordinate` in the fixed search order.
///
/// The neighbours are not filtered; callers check them against the grid bounds and walls.
#[must_use]
pub fn neighbors(coordinate: Coordinate) -> [Coordinate; 6] {
    DIRECTIONS.map(|direction| coordinate.offset(direction))
}

/// Checks whether `coordinate` lies inside a grid of the given extent.
#[must_use]
pub const fn in_bounds(coordinate: Coordinate, width: i32, height: i32, depth: i32) -> bool {
    coordinate.x >= 0
        && coordinate.x < width
        && coordinate.y >= 0
        && coordinate.y < height
        && coordinate.z >= 0
        && coordinate.z < depth
}

/// Validated extent of a grid.
///
/// Every dimension is strictly positive and the total number of cells fits in a `usize`, so the
/// dense index of any in-bounds coordinate can be computed without overflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// Extent along x.
    width: i32,
    /// Extent along y.
    height: i32,
    /// Extent along z.
    depth: i32,
    /// Cached product of the three extents.
    volume: usize,
}

impl Dimensions {
    /// Validates and builds a set of dimensions.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::InvalidDimensions`] if any dimension is zero or negative,
    /// or if the number of cells overflows a `usize`.
    pub fn new(width: i32, height: i32, depth: i32) -> Result<Self, MazeError> {
        let invalid = MazeError::InvalidDimensions {
            width,
            height,
            depth,
        };
        let (Ok(w), Ok(h), Ok(d)) = (
            usize::try_from(width),
            usize::try_from(height),
            usize::try_from(depth),
        ) else {
            return Err(invalid);
        };
        if w == 0 || h == 0 || d == 0 {
            return Err(invalid);
        }
        let volume = w
            .checked_mul(h)
            .and_then(|area| area.checked_mul(d))
            .ok_or(invalid)?;

        Ok(Self {
            width,
            height,
            depth,
            volume,
        })
    }

    /// Extent along x.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Extent along y.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Extent along z.
    #[must_use]
    pub const fn depth(&self) -> i32 {
        self.depth
    }

    /// Total number of cells.
    #[must_use]
    pub const fn volume(&self) -> usize {
        self.volume
    }

    /// Checks whether `coordinate` lies inside these dimensions.
    #[must_use]
    pub const fn contains(&self, coordinate: Coordinate) -> bool {
        in_bounds(coordinate, self.width, self.height, self.depth)
    }

    /// Maps an in-bounds coordinate to its position in dense storage.
    ///
    /// Storage is x-fastest, then y, then z: `x + width * (y + height * z)`.
    pub(crate) fn index(&self, coordinate: Coordinate) -> Option<usize> {
        if !self.contains(coordinate) {
            return None;
        }
        let x = usize::try_from(coordinate.x).ok()?;
        let y = usize::try_from(coordinate.y).ok()?;
        let z = usize::try_from(coordinate.z).ok()?;
        let width = usize::try_from(self.width).ok()?;
        let height = usize::try_from(self.height).ok()?;

        Some(x + width * (y + height * z))
    }

    /// Iterates every coordinate in storage order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> {
        let Self {
            width,
            height,
            depth,
            ..
        } = *self;

        (0..depth).flat_map(move |z| {
            (0..height).flat_map(move |y| (0..width).map(move |x| Coordinate::new(x, y, z)))
        })
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}x{}x{}", self.width, self.height, self.depth)
    }
}
