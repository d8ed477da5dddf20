use crate::config::PlacementStrategy;
use crate::grid::{Grid, Position};
use crate::random::RandomSource;
use crate::solve::solve;

/// Draws of the random-far strategy before settling for the last one
pub const RANDOM_FAR_ATTEMPTS: usize = 20;
/// Endpoint pairs sampled by the maximum-distance strategy
pub const MAXIMUM_DISTANCE_SAMPLES: usize = 10;

/// Start and end chosen on a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints {
    pub start: Position,
    pub end: Position,
}

impl Endpoints {
    /// Top left to bottom right
    #[must_use]
    pub const fn corners(grid: &Grid) -> Self {
        Self {
            start: Position::new(0, 0),
            end: Position::new(grid.height() - 1, grid.width() - 1),
        }
    }
}

/// Choose distinct start and end cells on a carved grid
pub fn place<R>(grid: &Grid, strategy: PlacementStrategy, rng: &mut R) -> Endpoints
where
    R: RandomSource + ?Sized,
{
    let endpoints = match strategy {
        PlacementStrategy::OppositeEdges => opposite_edges(grid, rng),
        PlacementStrategy::RandomFar => random_far(grid, rng),
        PlacementStrategy::MaximumDistance => maximum_distance(grid, rng),
    };
    if endpoints.start == endpoints.end {
        // only possible on single row or column grids
        return Endpoints::corners(grid);
    }
    endpoints
}

fn random_position<R>(grid: &Grid, rng: &mut R) -> Position
where
    R: RandomSource + ?Sized,
{
    Position::new(rng.pick_index(grid.height()), rng.pick_index(grid.width()))
}

fn opposite_edges<R>(grid: &Grid, rng: &mut R) -> Endpoints
where
    R: RandomSource + ?Sized,
{
    let (width, height) = (grid.width(), grid.height());
    if rng.flip() {
        // top to bottom
        Endpoints {
            start: Position::new(0, rng.pick_index(width)),
            end: Position::new(height - 1, rng.pick_index(width)),
        }
    } else {
        // left to right
        Endpoints {
            start: Position::new(rng.pick_index(height), 0),
            end: Position::new(rng.pick_index(height), width - 1),
        }
    }
}

/// Random coordinate in the half of `0..len` not containing `coord`
fn opposite_half<R>(coord: usize, len: usize, rng: &mut R) -> usize
where
    R: RandomSource + ?Sized,
{
    if len < 2 {
        return 0;
    }
    let mid = len / 2;
    if coord < mid {
        rng.pick_between(mid, len - 1)
    } else {
        rng.pick_index(mid)
    }
}

fn random_far<R>(grid: &Grid, rng: &mut R) -> Endpoints
where
    R: RandomSource + ?Sized,
{
    let min_distance = 0.7 * (grid.width() + grid.height()) as f64;
    let mut endpoints = None;
    for attempt in 0..RANDOM_FAR_ATTEMPTS {
        let start = random_position(grid, rng);
        let end = Position::new(
            opposite_half(start.row, grid.height(), rng),
            opposite_half(start.col, grid.width(), rng),
        );
        endpoints = Some(Endpoints { start, end });
        if start.distance(&end) as f64 > min_distance {
            log::trace!("Random far endpoints found after {} draws", attempt + 1);
            break;
        }
    }
    endpoints.unwrap_or_else(|| Endpoints::corners(grid))
}

fn maximum_distance<R>(grid: &Grid, rng: &mut R) -> Endpoints
where
    R: RandomSource + ?Sized,
{
    let mut best: Option<(Endpoints, usize)> = None;
    for _ in 0..MAXIMUM_DISTANCE_SAMPLES {
        let (start, end) = (random_position(grid, rng), random_position(grid, rng));
        if start == end {
            continue;
        }
        let Some(path) = solve(grid, start, end) else {
            continue;
        };
        if best.map_or(true, |(_, len)| path.len() > len) {
            best = Some((Endpoints { start, end }, path.len()));
        }
    }
    best.map(|(e, _)| e)
        .unwrap_or_else(|| Endpoints::corners(grid))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_wyrand::WyRand;

    use super::*;
    use crate::carve::carve;

    #[test]
    fn opposite_halves() {
        let mut rng = WyRand::seed_from_u64(11);
        for _ in 0..100 {
            assert!(opposite_half(1, 10, &mut rng) >= 5);
            assert!(opposite_half(7, 10, &mut rng) < 5);
            assert_eq!(opposite_half(0, 1, &mut rng), 0);
        }
    }

    #[test]
    fn endpoints_are_distinct_and_inside() {
        let mut rng = WyRand::seed_from_u64(5);
        for [w, h] in [[10, 10], [2, 1], [1, 3], [7, 4]] {
            let mut grid = Grid::new(w, h);
            carve(&mut grid, Position::new(0, 0), &mut rng);
            for strategy in [
                PlacementStrategy::OppositeEdges,
                PlacementStrategy::RandomFar,
                PlacementStrategy::MaximumDistance,
            ] {
                let Endpoints { start, end } = place(&grid, strategy, &mut rng);
                assert_ne!(start, end, "{strategy:?} on {w}x{h}");
                assert!(grid.contains(start) && grid.contains(end));
            }
        }
    }
}
