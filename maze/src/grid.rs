use bitflags::bitflags;

/// A cell coordinate, row increasing downward
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[inline(always)]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two positions
    /// ```
    /// use maze_tuner::grid::Position;
    ///
    /// assert_eq!(Position::new(0, 3).distance(&Position::new(2, 1)), 4)
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn distance(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Direction of an axis-adjacent position, if `other` is one
    /// ```
    /// use maze_tuner::grid::{Direction, Position};
    ///
    /// let p = Position::new(1, 1);
    /// assert_eq!(p.direction_to(&Position::new(0, 1)), Some(Direction::Up));
    /// assert_eq!(p.direction_to(&Position::new(2, 2)), None);
    /// ```
    #[must_use]
    pub fn direction_to(&self, other: &Position) -> Option<Direction> {
        match (
            other.row as isize - self.row as isize,
            other.col as isize - self.col as isize,
        ) {
            (-1, 0) => Some(Direction::Up),
            (0, 1) => Some(Direction::Right),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            _ => None,
        }
    }
}

/// One of the four axis directions
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions, in the order used whenever ties are broken
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    #[inline(always)]
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Wall flag on the side of a cell facing this direction
    #[inline(always)]
    #[must_use]
    pub const fn wall(self) -> Walls {
        match self {
            Direction::Up => Walls::Top,
            Direction::Right => Walls::Right,
            Direction::Down => Walls::Bottom,
            Direction::Left => Walls::Left,
        }
    }
}

bitflags! {
    /// Walls around a cell
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Walls: u8 {
        const Top    = 0b0001;
        const Right  = 0b0010;
        const Bottom = 0b0100;
        const Left   = 0b1000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub position: Position,
    pub walls: Walls,
    /// Scratch flag, only meaningful while a phase is running
    pub visited: bool,
}

impl Cell {
    /// Number of sides without a wall
    #[inline(always)]
    #[must_use]
    pub const fn openings(&self) -> usize {
        4 - self.walls.bits().count_ones() as usize
    }

    #[inline(always)]
    #[must_use]
    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls.contains(direction.wall())
    }
}

/// A fixed size rectangle of cells, stored row by row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Box<[Cell]>,
}

impl Grid {
    /// Create a grid where every cell has all four walls
    /// ```
    /// use maze_tuner::grid::{Grid, Position};
    ///
    /// let grid = Grid::new(4, 3);
    /// assert_eq!(grid.width(), 4);
    /// assert_eq!(grid.height(), 3);
    /// assert!(grid.positions().all(|p| grid.openings(p) == 0));
    /// ```
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width > 0 && height > 0,
            "Grid must have at least one cell, got {width}x{height}"
        );
        let cells = (0..height)
            .flat_map(|row| (0..width).map(move |col| Position::new(row, col)))
            .map(|position| Cell {
                position,
                walls: Walls::all(),
                visited: false,
            })
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    #[inline(always)]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// Convert a position to its index in the row by row storage
    /// ```
    /// use maze_tuner::grid::{Grid, Position};
    ///
    /// let grid = Grid::new(4, 3);
    /// assert_eq!(grid.index(Position::new(2, 1)), 9);
    /// assert_eq!(grid.position(9), Position::new(2, 1));
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn index(&self, pos: Position) -> usize {
        debug_assert!(self.contains(pos));
        pos.row * self.width + pos.col
    }

    #[inline(always)]
    #[must_use]
    pub const fn position(&self, index: usize) -> Position {
        debug_assert!(index < self.len());
        Position::new(index / self.width, index % self.width)
    }

    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&Cell> {
        self.contains(pos).then(|| &self.cells[self.index(pos)])
    }

    /// Cell at `pos`. Panics if `pos` is out of bounds.
    #[must_use]
    pub fn cell(&self, pos: Position) -> &Cell {
        self.get(pos)
            .unwrap_or_else(|| panic!("{pos:?} is outside a {}x{} grid", self.width, self.height))
    }

    fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        assert!(
            self.contains(pos),
            "{pos:?} is outside a {}x{} grid",
            self.width,
            self.height
        );
        let idx = self.index(pos);
        &mut self.cells[idx]
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.len()).map(|i| self.position(i))
    }

    /// Neighbour in a direction, regardless of walls
    /// ```
    /// use maze_tuner::grid::{Direction, Grid, Position};
    ///
    /// let grid = Grid::new(2, 2);
    /// assert_eq!(grid.neighbor(Position::new(0, 0), Direction::Right), Some(Position::new(0, 1)));
    /// assert_eq!(grid.neighbor(Position::new(0, 0), Direction::Up), None);
    /// ```
    #[must_use]
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        let Position { row, col } = pos;
        let next = match direction {
            Direction::Up => Position::new(row.checked_sub(1)?, col),
            Direction::Right => Position::new(row, col + 1),
            Direction::Down => Position::new(row + 1, col),
            Direction::Left => Position::new(row, col.checked_sub(1)?),
        };
        self.contains(next).then_some(next)
    }

    /// Whether one can step from `pos` in `direction`: no wall and a cell on the other side
    #[must_use]
    pub fn is_open(&self, pos: Position, direction: Direction) -> bool {
        !self.cell(pos).has_wall(direction) && self.neighbor(pos, direction).is_some()
    }

    /// Neighbours reachable without crossing a wall, in `Direction::ALL` order
    pub fn open_neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |d| !self.cell(pos).has_wall(*d))
            .filter_map(move |d| self.neighbor(pos, d))
    }

    /// Neighbours still separated from `pos` by a wall, with their direction
    pub fn walled_neighbors(
        &self,
        pos: Position,
    ) -> impl Iterator<Item = (Direction, Position)> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |d| self.cell(pos).has_wall(*d))
            .filter_map(move |d| self.neighbor(pos, d).map(|n| (d, n)))
    }

    #[must_use]
    pub fn openings(&self, pos: Position) -> usize {
        self.cell(pos).openings()
    }

    /// Remove the wall shared by two axis-adjacent cells.
    ///
    /// Both sides are cleared together. Returns `false` if the passage was already open.
    /// Panics if the cells are not adjacent.
    /// ```
    /// use maze_tuner::grid::{Direction, Grid, Position};
    ///
    /// let mut grid = Grid::new(2, 2);
    /// assert!(grid.remove_wall(Position::new(0, 0), Position::new(1, 0)));
    /// assert!(grid.is_open(Position::new(1, 0), Direction::Up));
    /// assert!(!grid.remove_wall(Position::new(1, 0), Position::new(0, 0)));
    /// ```
    pub fn remove_wall(&mut self, a: Position, b: Position) -> bool {
        let direction = match a.direction_to(&b) {
            Some(d) if self.contains(a) && self.contains(b) => d,
            _ => panic!("Cannot remove a wall between non adjacent cells {a:?} and {b:?}"),
        };
        let was_walled = self.cell(a).has_wall(direction);
        self.cell_mut(a).walls.remove(direction.wall());
        self.cell_mut(b).walls.remove(direction.opposite().wall());
        was_walled
    }

    /// Number of interior walls that have been removed
    #[must_use]
    pub fn passage_count(&self) -> usize {
        self.positions()
            .map(|p| {
                [Direction::Right, Direction::Down]
                    .into_iter()
                    .filter(|d| self.is_open(p, *d))
                    .count()
            })
            .sum()
    }

    #[must_use]
    pub fn is_visited(&self, pos: Position) -> bool {
        self.cell(pos).visited
    }

    pub fn set_visited(&mut self, pos: Position, visited: bool) {
        self.cell_mut(pos).visited = visited;
    }

    pub fn reset_visited(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.visited = false;
        }
    }
}
