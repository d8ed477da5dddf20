//! Candidate generation and selection.

use crate::carve::carve;
use crate::config::{Difficulty, GenerationConfig, ScoringWeights};
use crate::enhance::enhance;
use crate::grid::{Grid, Position};
use crate::placement::{place, Endpoints};
use crate::random::RandomSource;
use crate::Maze;

/// Cell every carving starts from
const CARVING_ORIGIN: Position = Position::new(0, 0);

/// Generate `config.attempts` candidates and return the best scoring one.
///
/// Ties go to the candidate generated first. If no candidate is solvable a plain
/// carved maze with corner endpoints is returned instead.
pub fn generate<R>(width: usize, height: usize, config: &GenerationConfig, rng: &mut R) -> Maze
where
    R: RandomSource + ?Sized,
{
    assert!(
        width > 0 && height > 0 && width * height >= 2,
        "A maze needs at least two cells, got {width}x{height}"
    );
    let attempts = config.attempts.max(1);

    let candidates: Vec<Maze> = (0..attempts)
        .filter_map(|attempt| {
            let maze = candidate(width, height, config, rng);
            if maze.is_none() {
                log::warn!("Candidate {attempt}: start and end are not connected, discarding");
            }
            maze
        })
        .collect();

    let mut best: Option<(Maze, f64)> = None;
    for (i, maze) in candidates.into_iter().enumerate() {
        let value = score(&maze, &config.weights);
        log::debug!(
            "Candidate {i}: score {value:.3}, complexity {:.1}, solution of {} cells",
            maze.metrics().complexity,
            maze.metrics().solution_length
        );
        if best.as_ref().map_or(true, |(_, best_value)| value > *best_value) {
            best = Some((maze, value));
        }
    }

    match best {
        Some((maze, value)) => {
            log::info!(
                "Selected a {width}x{height} maze scoring {value:.3}, from {:?} to {:?}",
                maze.start(),
                maze.end()
            );
            maze
        }
        None => {
            log::warn!("No solvable candidate in {attempts} attempts, falling back to a plain maze");
            simple(width, height, rng)
        }
    }
}

/// Generate a maze with the preset of a difficulty tier
pub fn for_difficulty<R>(difficulty: Difficulty, rng: &mut R) -> Maze
where
    R: RandomSource + ?Sized,
{
    let [width, height] = difficulty.size();
    generate(width, height, &difficulty.generation(), rng)
}

fn candidate<R>(width: usize, height: usize, config: &GenerationConfig, rng: &mut R) -> Option<Maze>
where
    R: RandomSource + ?Sized,
{
    let mut grid = Grid::new(width, height);
    carve(&mut grid, CARVING_ORIGIN, rng);
    let Endpoints { start, end } = place(&grid, config.placement, rng);
    let maze = Maze::from_grid(grid, start, end)?;
    if !config.enhancement.is_enabled() {
        return Some(maze);
    }
    match enhance(&maze, &config.enhancement, rng) {
        Ok((enhanced, _)) => Some(enhanced),
        Err(err) => {
            log::warn!("{err}, keeping the maze as carved");
            Some(maze)
        }
    }
}

/// Selection score of a candidate
#[must_use]
pub fn score(maze: &Maze, weights: &ScoringWeights) -> f64 {
    let metrics = maze.metrics();
    let perimeter = 2 * (maze.width() + maze.height());
    weights.tortuosity * metrics.tortuosity
        + weights.dead_end * metrics.average_dead_end_depth
        + weights.decoy * metrics.decoy_count as f64
        + weights.length * metrics.solution_length as f64 / perimeter as f64
}

/// Legacy generator: one carving, corner endpoints, no enhancement nor scoring
#[deprecated(note = "use `generate`, which places endpoints and selects among candidates")]
pub fn generate_simple<R>(width: usize, height: usize, rng: &mut R) -> Maze
where
    R: RandomSource + ?Sized,
{
    simple(width, height, rng)
}

fn simple<R>(width: usize, height: usize, rng: &mut R) -> Maze
where
    R: RandomSource + ?Sized,
{
    let mut grid = Grid::new(width, height);
    carve(&mut grid, CARVING_ORIGIN, rng);
    let Endpoints { start, end } = Endpoints::corners(&grid);
    Maze::from_grid(grid, start, end).expect("A carved grid should connect any two cells")
}
