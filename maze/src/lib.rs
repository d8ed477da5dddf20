//! Generation of rectangular grid mazes tuned towards a difficulty.
//!
//! A maze is carved as a spanning tree, given endpoints, solved and analysed;
//! several candidates are generated per request and the best scoring one is kept.
//!
//! ```
//! use maze_tuner::{generate_for_difficulty, Difficulty};
//!
//! let maze = generate_for_difficulty(Difficulty::Easy);
//! assert_eq!(maze.solution().first(), Some(&maze.start()));
//! assert_eq!(maze.solution().last(), Some(&maze.end()));
//! ```

use rand::{thread_rng, Rng, SeedableRng};
use rand_wyrand::WyRand;

pub mod analysis;
pub mod carve;
pub mod config;
pub mod enhance;
pub mod generate;
pub mod grid;
pub mod placement;
pub mod random;
pub mod session;
pub mod solve;

pub use analysis::{Analysis, DeadEnd, QualityMetrics};
pub use config::{Config, ConfigError, Difficulty, PartialConfig};
pub use grid::{Direction, Grid, Position};
pub use random::RandomSource;

/// A solved maze, with its analysis.
///
/// Immutable once built: solution, dead ends and metrics always describe `grid`.
#[derive(Debug, Clone, PartialEq)]
pub struct Maze {
    grid: Grid,
    start: Position,
    end: Position,
    solution: Vec<Position>,
    analysis: Analysis,
}

impl Maze {
    /// Solve and analyse an already carved grid.
    ///
    /// `None` if the endpoints are equal, outside the grid, or not connected.
    #[must_use]
    pub fn from_grid(grid: Grid, start: Position, end: Position) -> Option<Self> {
        if start == end || !grid.contains(start) || !grid.contains(end) {
            return None;
        }
        let solution = solve::solve(&grid, start, end)?;
        let analysis = analysis::analyze(&grid, &solution, end);
        Some(Self {
            grid,
            start,
            end,
            solution,
            analysis,
        })
    }

    /// Generate a maze from a full config
    #[must_use]
    pub fn generate(config: &Config) -> Self {
        let seed = config.seed.unwrap_or_else(|| thread_rng().gen());
        log::debug!(
            "Generating a {}x{} maze with seed {seed}",
            config.width,
            config.height
        );
        let mut rng = WyRand::seed_from_u64(seed);
        generate::generate(config.width, config.height, &config.generation, &mut rng)
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    #[must_use]
    pub fn start(&self) -> Position {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Position {
        self.end
    }

    /// Shortest path from start to end, both included
    #[must_use]
    pub fn solution(&self) -> &[Position] {
        &self.solution
    }

    #[must_use]
    pub fn dead_ends(&self) -> &[DeadEnd] {
        &self.analysis.dead_ends
    }

    #[must_use]
    pub fn metrics(&self) -> &QualityMetrics {
        &self.analysis.metrics
    }

    /// Run the analysis again from the grid
    #[must_use]
    pub fn reanalyze(&self) -> Analysis {
        analysis::analyze(&self.grid, &self.solution, self.end)
    }
}

/// Generate a maze with the preset of a difficulty tier, from a random seed
#[must_use]
pub fn generate_for_difficulty(difficulty: Difficulty) -> Maze {
    Maze::generate(&difficulty.config())
}
