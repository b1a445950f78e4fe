//! Command line binary streaming a pathfinder's search through a random voxel maze.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use color_eyre::{eyre::Result, install};

fn main() -> Result<()> {
    install()?;

    voxmaze::run()
}
