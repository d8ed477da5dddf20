//! Reshaping of a solved maze: longer dead ends close to the solution and
//! decoy branches off it. Walls are only ever removed.

use std::collections::HashSet;

use thiserror::Error;

use crate::analysis::DeadEnd;
use crate::config::EnhancementConfig;
use crate::grid::{Grid, Position};
use crate::random::RandomSource;
use crate::Maze;

/// Ceiling on the walls a single dead end extension may remove
pub const EXTENSION_STEP_LIMIT: usize = 1_000;
/// Ceiling on the walls a single decoy branch may remove
pub const BRANCH_STEP_LIMIT: usize = 1_000;

/// Inclusive bounds of a decoy branch length
pub const DECOY_LENGTH: [usize; 2] = [3, 6];

/// Extra cells given to dead ends in the first, middle and last third of the solution
const EXTENSION_TIERS: [[usize; 2]; 3] = [[5, 8], [3, 5], [2, 3]];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EnhanceError {
    /// The enhanced grid no longer connects start and end
    #[error("enhancement disconnected {start:?} from {end:?}")]
    Unsolvable { start: Position, end: Position },
}

/// A branch carved by the enhancer. Branches that removed no wall are not reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carving {
    /// Dead end or decoy candidate the branch grows from
    pub origin: Position,
    /// Walls the enhancer aimed to remove
    pub planned: usize,
    /// Walls actually removed
    pub carved: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnhancementReport {
    pub extensions: Vec<Carving>,
    pub decoys: Vec<Carving>,
}

impl EnhancementReport {
    #[must_use]
    pub fn walls_removed(&self) -> usize {
        self.extensions
            .iter()
            .chain(self.decoys.iter())
            .map(|c| c.carved)
            .sum()
    }
}

/// Enhance a copy of `maze`.
///
/// The result is re-solved and re-analysed. If start and end end up disconnected
/// the copy is dropped and an error returned, `maze` itself is never touched.
pub fn enhance<R>(
    maze: &Maze,
    config: &EnhancementConfig,
    rng: &mut R,
) -> Result<(Maze, EnhancementReport), EnhanceError>
where
    R: RandomSource + ?Sized,
{
    let (start, end) = (maze.start(), maze.end());
    let mut grid = maze.grid().clone();
    let on_path: HashSet<Position> = maze.solution().iter().copied().collect();

    let report = EnhancementReport {
        extensions: extend_dead_ends(&mut grid, maze, &on_path, config, rng),
        decoys: add_decoys(&mut grid, maze.solution(), &on_path, config.decoy_paths, rng),
    };
    log::debug!(
        "Enhancement removed {} walls ({} extensions, {} decoys)",
        report.walls_removed(),
        report.extensions.len(),
        report.decoys.len()
    );

    match Maze::from_grid(grid, start, end) {
        Some(enhanced) => Ok((enhanced, report)),
        None => Err(EnhanceError::Unsolvable { start, end }),
    }
}

fn extend_dead_ends<R>(
    grid: &mut Grid,
    maze: &Maze,
    on_path: &HashSet<Position>,
    config: &EnhancementConfig,
    rng: &mut R,
) -> Vec<Carving>
where
    R: RandomSource + ?Sized,
{
    let end = maze.end();
    let mut candidates: Vec<&DeadEnd> = maze
        .dead_ends()
        .iter()
        .filter(|d| d.near_solution && !on_path.contains(&d.position))
        .collect();
    candidates.sort_by_key(|d| d.solution_index);

    candidates
        .into_iter()
        .take(config.dead_ends_to_extend)
        .filter_map(|dead_end| {
            let planned = if config.prioritize_early_dead_ends {
                extension_length(
                    dead_end.solution_index.unwrap_or_default(),
                    maze.solution().len(),
                    rng,
                )
            } else {
                config.min_dead_end_length
            };
            // an earlier extension may have merged into this one
            let carved = if grid.openings(dead_end.position) == 1 {
                carve_branch(
                    grid,
                    dead_end.position,
                    planned,
                    on_path,
                    EXTENSION_STEP_LIMIT,
                    |n| n.distance(&end),
                )
            } else {
                0
            };
            log::trace!("{:?}: extended by {carved}/{planned}", dead_end.position);
            (carved > 0).then_some(Carving {
                origin: dead_end.position,
                planned,
                carved,
            })
        })
        .collect()
}

/// Extra length for a dead end next to solution cell `index`
fn extension_length<R>(index: usize, solution_len: usize, rng: &mut R) -> usize
where
    R: RandomSource + ?Sized,
{
    let progress = if solution_len <= 1 {
        0.
    } else {
        index as f64 / (solution_len - 1) as f64
    };
    let [min, max] = if progress < 1. / 3. {
        EXTENSION_TIERS[0]
    } else if progress < 2. / 3. {
        EXTENSION_TIERS[1]
    } else {
        EXTENSION_TIERS[2]
    };
    rng.pick_between(min, max)
}

#[derive(Debug, Clone, Copy)]
struct DecoyCandidate {
    /// Solution cell the decoy hangs off
    anchor: Position,
    position: Position,
    score: f64,
}

/// 1 at the middle of the path, 0 at both ends
fn middleness(index: usize, len: usize) -> f64 {
    if len < 2 {
        return 0.;
    }
    1. - (2. * index as f64 / (len - 1) as f64 - 1.).abs()
}

fn decoy_candidates(
    grid: &Grid,
    solution: &[Position],
    on_path: &HashSet<Position>,
) -> Vec<DecoyCandidate> {
    let mut seen = HashSet::new();
    let mut candidates = vec![];
    for (i, &anchor) in solution.iter().enumerate() {
        let middleness = middleness(i, solution.len());
        for (_, position) in grid.walled_neighbors(anchor) {
            if on_path.contains(&position) || !seen.insert(position) {
                continue;
            }
            let free_sides = 4 - grid.openings(position);
            candidates.push(DecoyCandidate {
                anchor,
                position,
                score: 2. * middleness + 0.25 * free_sides as f64,
            })
        }
    }
    // stable, so equal scores keep path order
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .expect("Decoy scores should be comparable (not NaN)")
    });
    candidates
}

fn add_decoys<R>(
    grid: &mut Grid,
    solution: &[Position],
    on_path: &HashSet<Position>,
    count: usize,
    rng: &mut R,
) -> Vec<Carving>
where
    R: RandomSource + ?Sized,
{
    let mut decoys = vec![];
    if count == 0 {
        return decoys;
    }
    for DecoyCandidate {
        anchor, position, ..
    } in decoy_candidates(grid, solution, on_path)
    {
        if decoys.len() >= count {
            break;
        }
        // branching off a corridor cell would turn it into a junction
        if grid.openings(position) > 1 {
            continue;
        }
        let planned = rng.pick_between(DECOY_LENGTH[0], DECOY_LENGTH[1]);
        let mut carved = 0;
        if grid.openings(position) == 0 {
            // unreached pocket, hook it to the solution first
            grid.remove_wall(anchor, position);
            carved += 1;
        }
        carved += carve_branch(
            grid,
            position,
            planned - carved,
            on_path,
            BRANCH_STEP_LIMIT,
            |n| n.distance(&anchor),
        );
        log::trace!("{position:?}: decoy of {carved}/{planned} off {anchor:?}");
        if carved > 0 {
            decoys.push(Carving {
                origin: position,
                planned,
                carved,
            });
        }
    }
    decoys
}

/// Greedily carve a branch from `from`, at most `length` walls.
///
/// Each step goes to the walled neighbour with the highest `preference`, ties going to
/// the first in `Direction::ALL` order. Neighbours already on the branch, in `forbidden`
/// or with more than one opening are skipped. The walk stops before any cell gets more
/// than two openings.
fn carve_branch<F>(
    grid: &mut Grid,
    from: Position,
    length: usize,
    forbidden: &HashSet<Position>,
    step_limit: usize,
    mut preference: F,
) -> usize
where
    F: FnMut(&Position) -> usize,
{
    let mut walked = HashSet::from([from]);
    let mut current = from;
    let mut carved = 0;
    for _ in 0..step_limit {
        if carved >= length || grid.openings(current) > 1 {
            break;
        }
        let next = grid
            .walled_neighbors(current)
            .map(|(_, n)| n)
            .filter(|n| !walked.contains(n) && !forbidden.contains(n) && grid.openings(*n) <= 1)
            .fold(None, |best: Option<(Position, usize)>, n| {
                let score = preference(&n);
                match best {
                    Some((_, best_score)) if best_score >= score => best,
                    _ => Some((n, score)),
                }
            });
        let Some((next, _)) = next else {
            break;
        };
        grid.remove_wall(current, next);
        walked.insert(next);
        current = next;
        carved += 1;
    }
    carved
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_wyrand::WyRand;

    use super::*;

    #[test]
    fn early_dead_ends_get_longer_extensions() {
        let mut rng = WyRand::seed_from_u64(3);
        for _ in 0..100 {
            assert!((5..=8).contains(&extension_length(1, 30, &mut rng)));
            assert!((3..=5).contains(&extension_length(15, 30, &mut rng)));
            assert!((2..=3).contains(&extension_length(28, 30, &mut rng)));
        }
    }

    #[test]
    fn middleness_peaks_at_the_middle() {
        assert_eq!(middleness(0, 9), 0.);
        assert_eq!(middleness(8, 9), 0.);
        assert_eq!(middleness(4, 9), 1.);
        assert!(middleness(2, 9) > 0. && middleness(2, 9) < 1.);
    }

    #[test]
    fn branch_never_makes_junctions() {
        // a corridor along the top row, branch from its middle
        let mut grid = Grid::new(5, 3);
        for col in 0..4 {
            grid.remove_wall(Position::new(0, col), Position::new(0, col + 1));
        }
        grid.remove_wall(Position::new(0, 2), Position::new(1, 2));
        let carved = carve_branch(
            &mut grid,
            Position::new(1, 2),
            10,
            &HashSet::new(),
            BRANCH_STEP_LIMIT,
            |n| n.row,
        );
        assert!(carved > 0);
        for p in grid.positions() {
            if p != Position::new(0, 2) {
                assert!(grid.openings(p) <= 2, "{p:?} became a junction");
            }
        }
    }
}
