use rand::{Rng, SeedableRng};
use rand_wyrand::WyRand;

use maze_tuner::config::EnhancementConfig;
use maze_tuner::enhance::{enhance, EnhanceError};
use maze_tuner::grid::{Grid, Position};
use maze_tuner::{generate, Difficulty, Maze};

/// A 9x9 grid with only row 4 carved, start and end at its ends
fn corridor() -> Grid {
    let mut grid = Grid::new(9, 9);
    for col in 0..8 {
        grid.remove_wall(Position::new(4, col), Position::new(4, col + 1));
    }
    grid
}

fn corridor_maze(grid: Grid) -> Maze {
    Maze::from_grid(grid, Position::new(4, 0), Position::new(4, 8)).unwrap()
}

#[test]
fn decoys_are_carved_off_the_middle() {
    let maze = corridor_maze(corridor());
    let config = EnhancementConfig {
        decoy_paths: 2,
        ..EnhancementConfig::DISABLED
    };
    let mut rng = WyRand::seed_from_u64(21);
    let (enhanced, report) = enhance(&maze, &config, &mut rng).unwrap();

    assert_eq!(report.decoys.len(), 2);
    assert_eq!(report.decoys[0].origin, Position::new(3, 4));
    assert_eq!(report.decoys[1].origin, Position::new(5, 4));
    for decoy in &report.decoys {
        assert!((3..=6).contains(&decoy.planned));
        assert_eq!(decoy.carved, decoy.planned);
    }
    let added = enhanced.grid().passage_count() - maze.grid().passage_count();
    assert_eq!(added, report.decoys.iter().map(|d| d.carved).sum::<usize>());
    assert!(added >= 6);

    // decoys never touch the solution
    assert_eq!(enhanced.solution(), maze.solution());
    for p in enhanced.grid().positions() {
        if p != Position::new(4, 4) {
            assert!(enhanced.grid().openings(p) <= 2, "{p:?} became a junction");
        }
    }
}

#[test]
fn dead_ends_grow_away_from_the_end() {
    let mut grid = corridor();
    grid.remove_wall(Position::new(4, 4), Position::new(3, 4));
    let maze = corridor_maze(grid);
    let config = EnhancementConfig {
        min_dead_end_length: 4,
        dead_ends_to_extend: 1,
        decoy_paths: 0,
        prioritize_early_dead_ends: false,
    };
    let mut rng = WyRand::seed_from_u64(0);
    let (enhanced, report) = enhance(&maze, &config, &mut rng).unwrap();

    assert_eq!(report.extensions.len(), 1);
    assert_eq!(report.extensions[0].origin, Position::new(3, 4));
    assert_eq!(report.extensions[0].carved, 4);
    assert_eq!(
        enhanced.grid().passage_count(),
        maze.grid().passage_count() + 4
    );
    // up to the top border, then left, away from the end
    let tip = enhanced
        .dead_ends()
        .iter()
        .find(|d| d.position == Position::new(0, 3))
        .expect("the extension should end in a dead end");
    assert_eq!(tip.depth, 5);
    assert_eq!(enhanced.metrics().max_dead_end_depth, 5);
    assert_eq!(enhanced.solution(), maze.solution());
}

/// The corridor with single cell teeth above column 6 and below column 2
fn toothed_corridor() -> Maze {
    let mut grid = corridor();
    grid.remove_wall(Position::new(4, 6), Position::new(3, 6));
    grid.remove_wall(Position::new(4, 2), Position::new(5, 2));
    corridor_maze(grid)
}

#[test]
fn earliest_dead_ends_are_extended_first() {
    let maze = toothed_corridor();
    let config = EnhancementConfig {
        min_dead_end_length: 2,
        dead_ends_to_extend: 1,
        decoy_paths: 0,
        prioritize_early_dead_ends: false,
    };
    let (enhanced, report) = enhance(&maze, &config, &mut WyRand::seed_from_u64(4)).unwrap();

    assert_eq!(report.extensions.len(), 1);
    assert_eq!(report.extensions[0].origin, Position::new(5, 2));
    assert_eq!(report.extensions[0].carved, 2);
    // the later tooth is left alone
    assert_eq!(enhanced.grid().openings(Position::new(3, 6)), 1);
    assert_eq!(enhanced.grid().openings(Position::new(2, 6)), 0);
    assert_eq!(enhanced.grid().openings(Position::new(7, 2)), 1);
}

#[test]
fn early_dead_ends_get_the_longest_extensions() {
    let maze = toothed_corridor();
    let config = EnhancementConfig {
        min_dead_end_length: 1,
        dead_ends_to_extend: 2,
        decoy_paths: 0,
        prioritize_early_dead_ends: true,
    };
    let mut rng = WyRand::seed_from_u64(8);
    for _ in 0..20 {
        let (_, report) = enhance(&maze, &config, &mut rng).unwrap();
        let [early, late] = report.extensions.as_slice() else {
            panic!("expected two extensions, got {:?}", report.extensions);
        };
        assert_eq!(early.origin, Position::new(5, 2));
        assert!((5..=8).contains(&early.planned));
        assert_eq!(early.carved, early.planned);
        assert_eq!(late.origin, Position::new(3, 6));
        assert!((2..=3).contains(&late.planned));
    }
}

#[test]
fn branches_that_carve_nothing_are_not_reported() {
    // start and end fence in the only dead end
    let mut grid = Grid::new(2, 2);
    grid.remove_wall(Position::new(0, 0), Position::new(0, 1));
    grid.remove_wall(Position::new(0, 1), Position::new(1, 1));
    grid.remove_wall(Position::new(0, 0), Position::new(1, 0));
    let maze = Maze::from_grid(grid, Position::new(0, 0), Position::new(1, 1)).unwrap();
    let config = EnhancementConfig {
        min_dead_end_length: 3,
        dead_ends_to_extend: 1,
        decoy_paths: 1,
        prioritize_early_dead_ends: false,
    };
    let (enhanced, report) = enhance(&maze, &config, &mut WyRand::seed_from_u64(2)).unwrap();
    assert!(report.extensions.is_empty());
    assert!(report.decoys.is_empty());
    assert_eq!(report.walls_removed(), 0);
    assert_eq!(enhanced.grid(), maze.grid());
}

#[test]
fn endpoints_are_never_extended() {
    let maze = corridor_maze(corridor());
    let config = EnhancementConfig {
        dead_ends_to_extend: 5,
        ..EnhancementConfig::DISABLED
    };
    let (enhanced, report) = enhance(&maze, &config, &mut WyRand::seed_from_u64(1)).unwrap();
    assert!(report.extensions.is_empty());
    assert_eq!(enhanced.grid(), maze.grid());
}

#[test]
fn enhancement_keeps_mazes_solvable() {
    let mut rng = WyRand::seed_from_u64(77);
    for _ in 0..30 {
        let difficulty = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
            [rng.gen_range(0..3)];
        let maze = generate::for_difficulty(difficulty, &mut rng);
        let config = EnhancementConfig {
            min_dead_end_length: rng.gen_range(1..6),
            dead_ends_to_extend: rng.gen_range(0..10),
            decoy_paths: rng.gen_range(0..10),
            prioritize_early_dead_ends: rng.gen(),
        };
        let (enhanced, report) = enhance(&maze, &config, &mut rng).unwrap();
        assert_eq!(enhanced.solution().first(), Some(&maze.start()));
        assert_eq!(enhanced.solution().last(), Some(&maze.end()));
        assert_eq!(
            enhanced.grid().passage_count(),
            maze.grid().passage_count() + report.walls_removed()
        );
        // walls only ever go away
        for p in maze.grid().positions() {
            let before = maze.grid().cell(p).walls;
            assert!(before.contains(enhanced.grid().cell(p).walls));
        }
        // the cached analysis matches the enhanced grid
        assert_eq!(&enhanced.reanalyze().metrics, enhanced.metrics());
    }
}

#[test]
fn unsolvable_error_names_endpoints() {
    let err = EnhanceError::Unsolvable {
        start: Position::new(0, 0),
        end: Position::new(1, 1),
    };
    assert_eq!(
        err.to_string(),
        "enhancement disconnected Position { row: 0, col: 0 } from Position { row: 1, col: 1 }"
    );
    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert!(boxed.source().is_none());
}
