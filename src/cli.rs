//! Command line front end: generates a maze and streams a search over it to standard output.

use std::{
    io::{self, Write},
    thread,
    time::Duration,
};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr as _};
use env_logger::{Builder, Env};
use log::info;

use crate::{
    config::{MazeConfig, DEFAULT_SIDE, DEFAULT_WALL_PROBABILITY},
    labyrinth::Labyrinth,
    search::{Algorithm, SearchEvent},
};

/// Default pause between two printed events, in milliseconds.
const DEFAULT_DELAY_MS: u64 = 50;

/// Generate a random 3D voxel maze and watch a pathfinder search it.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Extent of the maze along x
    #[arg(short = 'W', long, default_value_t = DEFAULT_SIDE)]
    pub width: i32,

    /// Extent of the maze along y
    #[arg(short = 'H', long, default_value_t = DEFAULT_SIDE)]
    pub height: i32,

    /// Extent of the maze along z
    #[arg(short = 'D', long, default_value_t = DEFAULT_SIDE)]
    pub depth: i32,

    /// Probability in [0, 1] for each cell to be a wall
    #[arg(short = 'p', long, default_value_t = DEFAULT_WALL_PROBABILITY)]
    pub wall_probability: f64,

    /// Seed of the maze generator; a random one is drawn when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Pathfinder to run
    #[arg(short, long, value_enum, default_value_t = Algorithm::Dijkstra)]
    pub algorithm: Algorithm,

    /// Pause between two search events, in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    /// Print the maze layers before searching
    #[arg(long)]
    pub show_grid: bool,
}

impl Cli {
    /// Maze parameters carried by the arguments.
    #[must_use]
    pub const fn maze_config(&self) -> MazeConfig {
        MazeConfig {
            width: self.width,
            height: self.height,
            depth: self.depth,
            wall_probability: self.wall_probability,
            seed: self.seed,
        }
    }
}

/// Entry point of the binary: sets up logging, parses the arguments and runs the search.
///
/// The log filter is read from `RUST_LOG` and defaults to `warn`.
///
/// # Errors
///
/// This function returns an error if the logger was already installed, if the maze parameters are
/// invalid, or if writing to standard output fails.
pub fn run() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("warn"))
        .try_init()
        .wrap_err("failed to install the logger")?;

    let cli = Cli::parse();
    let stdout = io::stdout();
    run_with(&cli, &mut stdout.lock())
}

/// Generates the maze described by `cli` and writes every search event to `out`.
///
/// Events are paced by [`Cli::delay_ms`]. The stream is followed by a one-line summary.
///
/// # Errors
///
/// This function returns an error if the maze parameters are invalid or if writing to `out` fails.
pub fn run_with<W>(cli: &Cli, out: &mut W) -> Result<()>
where
    W: Write,
{
    let mut labyrinth =
        Labyrinth::generate(cli.maze_config()).wrap_err("failed to generate the maze")?;
    let grid = labyrinth.grid();
    writeln!(
        out,
        "maze {} seed {} start {} end {}",
        grid.dimensions(),
        labyrinth.seed(),
        grid.start(),
        grid.end()
    )?;
    if cli.show_grid {
        write!(out, "{grid}")?;
    }

    let delay = Duration::from_millis(cli.delay_ms);
    let (mut visited, mut backtracked) = (0_usize, 0_usize);
    for event in labyrinth.search(cli.algorithm) {
        match event {
            SearchEvent::Visiting(_) => visited += 1,
            SearchEvent::Backtracking(_) => backtracked += 1,
            SearchEvent::PathFound(_) | SearchEvent::NotFound => {}
        }
        writeln!(out, "{event}").wrap_err("failed to write a search event")?;
        if !event.is_terminal() && !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    info!("{} search finished after {visited} visits", cli.algorithm);
    writeln!(
        out,
        "{}: {visited} cells visited, {backtracked} backtracked",
        cli.algorithm
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchReport;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("arguments should parse")
    }

    fn output(cli: &Cli) -> String {
        let mut buffer = Vec::new();
        run_with(cli, &mut buffer).expect("run should succeed");

        String::from_utf8(buffer).expect("output is utf-8")
    }

    #[test]
    fn test_default_arguments() {
        let cli = parse(&["voxmaze"]);

        assert_eq!(cli.maze_config(), MazeConfig::default());
        assert_eq!(cli.algorithm, Algorithm::Dijkstra);
        assert_eq!(cli.delay_ms, 50);
        assert!(!cli.show_grid);
    }

    #[test]
    fn test_explicit_arguments() {
        let cli = parse(&[
            "voxmaze",
            "--width",
            "4",
            "-H",
            "3",
            "--depth",
            "2",
            "--wall-probability",
            "0.5",
            "--seed",
            "17",
            "--algorithm",
            "dfs",
            "--delay-ms",
            "0",
            "--show-grid",
        ]);

        assert_eq!(
            cli.maze_config(),
            MazeConfig {
                width: 4,
                height: 3,
                depth: 2,
                wall_probability: 0.5,
                seed: Some(17),
            }
        );
        assert_eq!(cli.algorithm, Algorithm::Dfs);
        assert!(cli.show_grid);
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        assert!(Cli::try_parse_from(["voxmaze", "--algorithm", "astar"]).is_err());
    }

    #[test]
    fn test_open_maze_output() {
        let cli = parse(&[
            "voxmaze",
            "-W",
            "3",
            "-H",
            "2",
            "-D",
            "2",
            "-p",
            "0",
            "--seed",
            "5",
            "--delay-ms",
            "0",
            "--show-grid",
        ]);
        let text = output(&cli);
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines
            .first()
            .is_some_and(|line| line.starts_with("maze 3x2x2 seed 5 ")));
        assert!(text.contains("path found"));
        assert!(lines
            .last()
            .is_some_and(|line| line.starts_with("dijkstra: ")));
        assert_eq!(text.matches('S').count(), 1);
    }

    #[test]
    fn test_dense_maze_output() {
        let cli = parse(&[
            "voxmaze", "-W", "4", "-H", "4", "-D", "1", "-p", "1", "--seed", "2", "-a", "dfs", "-d",
            "0",
        ]);
        let text = output(&cli);
        let mut labyrinth =
            Labyrinth::generate(cli.maze_config()).expect("configuration is valid");
        let expected = if SearchReport::from_events(labyrinth.search(Algorithm::Dfs)).found() {
            "path found"
        } else {
            "no path"
        };

        assert!(text.contains(expected));
        assert!(text.lines().last().is_some_and(|line| line.starts_with("dfs: ")));
    }

    #[test]
    fn test_invalid_parameters_fail() {
        let cli = parse(&["voxmaze", "--wall-probability", "1.5", "--delay-ms", "0"]);
        let mut buffer = Vec::new();

        assert!(run_with(&cli, &mut buffer).is_err());
        assert!(buffer.is_empty());
    }
}
