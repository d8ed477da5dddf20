//! Player state over a generated maze.

use crate::grid::{Direction, Position};
use crate::Maze;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// A wall or the border is in the way
    Blocked,
    Moved(Position),
    /// The move reached the end
    Won(Position),
}

/// A player walking through a maze, from its start
#[derive(Debug, Clone)]
pub struct Session<'m> {
    maze: &'m Maze,
    position: Position,
    /// Cells walked so far, without the parts walked back over
    trail: Vec<Position>,
}

impl<'m> Session<'m> {
    pub fn new(maze: &'m Maze) -> Self {
        Self {
            maze,
            position: maze.start(),
            trail: vec![maze.start()],
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn trail(&self) -> &[Position] {
        &self.trail
    }

    #[must_use]
    pub fn has_won(&self) -> bool {
        self.position == self.maze.end()
    }

    /// A move is legal if no wall blocks it and it stays inside the grid
    #[must_use]
    pub fn can_move(&self, direction: Direction) -> bool {
        self.maze.grid().is_open(self.position, direction)
    }

    pub fn step(&mut self, direction: Direction) -> Move {
        if !self.can_move(direction) {
            return Move::Blocked;
        }
        let Some(next) = self.maze.grid().neighbor(self.position, direction) else {
            return Move::Blocked;
        };
        // stepping back onto the previous cell retracts the trail
        if self.trail.len() >= 2 && self.trail[self.trail.len() - 2] == next {
            self.trail.pop();
        } else {
            self.trail.push(next);
        }
        self.position = next;
        if self.has_won() {
            log::debug!("Reached the end at {next:?} after {} cells", self.trail.len());
            Move::Won(next)
        } else {
            Move::Moved(next)
        }
    }
}
