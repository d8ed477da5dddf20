use maze_tuner::grid::{Direction, Grid, Position};
use maze_tuner::session::{Move, Session};
use maze_tuner::Maze;

/// Two rows: a corridor on top, going down on the right side
fn hook() -> Maze {
    let mut grid = Grid::new(3, 2);
    grid.remove_wall(Position::new(0, 0), Position::new(0, 1));
    grid.remove_wall(Position::new(0, 1), Position::new(0, 2));
    grid.remove_wall(Position::new(0, 2), Position::new(1, 2));
    grid.remove_wall(Position::new(0, 1), Position::new(1, 1));
    Maze::from_grid(grid, Position::new(0, 0), Position::new(1, 2)).unwrap()
}

#[test]
fn walls_and_borders_block() {
    let maze = hook();
    let mut session = Session::new(&maze);
    assert_eq!(session.step(Direction::Up), Move::Blocked);
    assert_eq!(session.step(Direction::Left), Move::Blocked);
    assert_eq!(session.step(Direction::Down), Move::Blocked);
    assert_eq!(session.position(), maze.start());
    assert_eq!(session.trail(), &[maze.start()]);
}

#[test]
fn reaching_the_end_wins() {
    let maze = hook();
    let mut session = Session::new(&maze);
    assert_eq!(session.step(Direction::Right), Move::Moved(Position::new(0, 1)));
    assert_eq!(session.step(Direction::Right), Move::Moved(Position::new(0, 2)));
    assert!(!session.has_won());
    assert_eq!(session.step(Direction::Down), Move::Won(Position::new(1, 2)));
    assert!(session.has_won());
    assert_eq!(session.trail(), maze.solution());
}

#[test]
fn stepping_back_trims_the_trail() {
    let maze = hook();
    let mut session = Session::new(&maze);
    session.step(Direction::Right);
    session.step(Direction::Down);
    assert_eq!(session.trail().len(), 3);
    session.step(Direction::Up);
    assert_eq!(
        session.trail(),
        &[Position::new(0, 0), Position::new(0, 1)]
    );
    session.step(Direction::Left);
    assert_eq!(session.trail(), &[maze.start()]);
}
