use crate::grid::{Grid, Position};
use crate::random::RandomSource;

/// Carve a perfect maze into `grid` with a randomized depth first backtracker.
///
/// Every cell reachable from `origin` gets visited exactly once, so on a fully
/// walled grid the result is a spanning tree and exactly `width * height - 1`
/// walls are removed. Visited flags are cleared before returning.
///
/// Returns the number of walls removed.
pub fn carve<R>(grid: &mut Grid, origin: Position, rng: &mut R) -> usize
where
    R: RandomSource + ?Sized,
{
    assert!(grid.contains(origin), "Carving origin {origin:?} is outside the grid");
    log::debug!(
        "Carving a {}x{} grid from {origin:?}",
        grid.width(),
        grid.height()
    );

    let mut removed = 0;
    let mut stack = vec![origin];
    grid.set_visited(origin, true);

    while let Some(&current) = stack.last() {
        let unvisited: Vec<Position> = grid
            .walled_neighbors(current)
            .map(|(_, n)| n)
            .filter(|n| !grid.is_visited(*n))
            .collect();
        if unvisited.is_empty() {
            // dead end of the walk, backtrack
            stack.pop();
            continue;
        }
        let next = unvisited[rng.pick_index(unvisited.len())];
        log::trace!("{current:?}: carving towards {next:?}");
        if grid.remove_wall(current, next) {
            removed += 1;
        }
        grid.set_visited(next, true);
        stack.push(next);
    }

    grid.reset_visited();
    removed
}
