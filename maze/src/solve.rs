use std::collections::VecDeque;

use crate::grid::{Grid, Position};

/// Shortest path from `start` to `end` through open passages.
///
/// The path includes both endpoints. `None` if `end` cannot be reached.
pub fn solve(grid: &Grid, start: Position, end: Position) -> Option<Vec<Position>> {
    assert!(
        grid.contains(start) && grid.contains(end),
        "Endpoints {start:?} -> {end:?} must lie inside the grid"
    );

    // predecessor of every reached cell, the start points to itself
    let mut came_from: Box<[Option<Position>]> = vec![None; grid.len()].into_boxed_slice();
    let mut queue = VecDeque::new();
    came_from[grid.index(start)] = Some(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == end {
            let mut path = vec![end];
            let mut cursor = end;
            while cursor != start {
                cursor = came_from[grid.index(cursor)]
                    .expect("Every reached cell should have a predecessor");
                path.push(cursor);
            }
            path.reverse();
            return Some(path);
        }
        for next in grid.open_neighbors(current) {
            let slot = &mut came_from[grid.index(next)];
            if slot.is_none() {
                *slot = Some(current);
                queue.push_back(next);
            }
        }
    }

    log::debug!("No path from {start:?} to {end:?}");
    None
}
