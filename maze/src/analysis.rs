//! Structural measurements of a solved maze: dead ends, tortuosity and the
//! aggregate complexity score.

use crate::grid::{Direction, Grid, Position};

/// Ceiling on the cells a single corridor walk may visit.
///
/// Guards against pathological grids (e.g. corridors closing on themselves after
/// enhancement); a walk that hits it reports the depth reached so far.
pub const CORRIDOR_WALK_LIMIT: usize = 10_000;

/// A dead end at Manhattan distance up to this from the solution counts as a decoy
pub const NEAR_SOLUTION_DISTANCE: usize = 2;

/// A cell with a single open side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadEnd {
    pub position: Position,
    /// Cells in the corridor ending here, the dead end included
    pub depth: usize,
    /// Manhattan distance to the maze end
    pub distance_to_end: usize,
    pub near_solution: bool,
    /// Index of the closest solution cell, set when `near_solution`
    pub solution_index: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QualityMetrics {
    /// Cells on the solution path, endpoints included
    pub solution_length: usize,
    pub tortuosity: f64,
    pub average_dead_end_depth: f64,
    pub max_dead_end_depth: usize,
    /// Dead ends near the solution path
    pub decoy_count: usize,
    /// Aggregate score in `[0, 100]`
    pub complexity: f64,
}

/// Everything derived from a grid and its solution
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Analysis {
    pub dead_ends: Vec<DeadEnd>,
    pub metrics: QualityMetrics,
}

/// Analyse `grid` given its solution path towards `end`
pub fn analyze(grid: &Grid, solution: &[Position], end: Position) -> Analysis {
    let dead_ends = find_dead_ends(grid, solution, end);
    let metrics = metrics(grid, solution, &dead_ends);
    log::trace!("Analysis: {metrics:?}");
    Analysis { dead_ends, metrics }
}

pub fn find_dead_ends(grid: &Grid, solution: &[Position], end: Position) -> Vec<DeadEnd> {
    grid.positions()
        .filter(|p| grid.openings(*p) == 1)
        .map(|position| {
            let nearest = solution
                .iter()
                .enumerate()
                .map(|(i, s)| (i, s.distance(&position)))
                // first minimum wins
                .fold(None, |best: Option<(usize, usize)>, (i, d)| match best {
                    Some((_, bd)) if bd <= d => best,
                    _ => Some((i, d)),
                });
            let near_solution = nearest.is_some_and(|(_, d)| d <= NEAR_SOLUTION_DISTANCE);
            DeadEnd {
                position,
                depth: corridor_depth(grid, position),
                distance_to_end: position.distance(&end),
                near_solution,
                solution_index: nearest.filter(|_| near_solution).map(|(i, _)| i),
            }
        })
        .collect()
}

/// Length of the corridor starting at `dead_end`, up to the first junction.
///
/// The dead end itself and every two-sided cell after it count.
pub fn corridor_depth(grid: &Grid, dead_end: Position) -> usize {
    let mut depth = 1;
    let mut previous = dead_end;
    let Some(mut current) = grid.open_neighbors(dead_end).next() else {
        return depth;
    };
    for _ in 0..CORRIDOR_WALK_LIMIT {
        match grid.openings(current) {
            2 => {
                depth += 1;
                let Some(next) = grid.open_neighbors(current).find(|n| *n != previous) else {
                    break;
                };
                previous = current;
                current = next;
                if current == dead_end {
                    // walked a loop back to the start
                    break;
                }
            }
            1 => {
                // the corridor is closed at both ends
                depth += 1;
                break;
            }
            _ => break,
        }
    }
    depth
}

/// Direction changes along `path`, over the straight line distance between its ends
/// ```
/// use maze_tuner::analysis::tortuosity;
/// use maze_tuner::grid::Position;
///
/// let straight = [Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)];
/// assert_eq!(tortuosity(&straight), 0.);
/// let bent = [Position::new(0, 0), Position::new(0, 1), Position::new(1, 1)];
/// assert_eq!(tortuosity(&bent), 0.5);
/// ```
#[must_use]
pub fn tortuosity(path: &[Position]) -> f64 {
    if path.len() < 3 {
        return 0.;
    }
    let (first, last) = (path[0], path[path.len() - 1]);
    let straight = first.distance(&last);
    if straight == 0 {
        return 0.;
    }
    let directions: Vec<Option<Direction>> = path
        .windows(2)
        .map(|w| w[0].direction_to(&w[1]))
        .collect();
    let turns = directions.windows(2).filter(|w| w[0] != w[1]).count();
    turns as f64 / straight as f64
}

/// Weighted complexity score in `[0, 100]`
#[must_use]
pub fn complexity(
    solution_length: usize,
    max_length: usize,
    tortuosity: f64,
    average_dead_end_depth: f64,
    decoy_count: usize,
) -> f64 {
    let length = if max_length == 0 {
        0.
    } else {
        (solution_length as f64 / max_length as f64 * 30.).min(30.)
    };
    let turns = (tortuosity * 10.).min(30.);
    let dead_ends = (average_dead_end_depth * 4.).min(25.);
    let decoys = (decoy_count as f64 * 2.).min(15.);
    (length + turns + dead_ends + decoys).clamp(0., 100.)
}

fn metrics(grid: &Grid, solution: &[Position], dead_ends: &[DeadEnd]) -> QualityMetrics {
    let tortuosity = tortuosity(solution);
    let average_dead_end_depth = if dead_ends.is_empty() {
        0.
    } else {
        dead_ends.iter().map(|d| d.depth).sum::<usize>() as f64 / dead_ends.len() as f64
    };
    let max_dead_end_depth = dead_ends.iter().map(|d| d.depth).max().unwrap_or(0);
    let decoy_count = dead_ends.iter().filter(|d| d.near_solution).count();
    QualityMetrics {
        solution_length: solution.len(),
        tortuosity,
        average_dead_end_depth,
        max_dead_end_depth,
        decoy_count,
        complexity: complexity(
            solution.len(),
            grid.len(),
            tortuosity,
            average_dead_end_depth,
            decoy_count,
        ),
    }
}
