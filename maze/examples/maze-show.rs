use std::{fs::read_to_string, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use simple_logger::SimpleLogger;

use maze_tuner::grid::Walls;
use maze_tuner::{Maze, PartialConfig, Position};

#[derive(Debug, Parser)]
struct Args {
    /// Configuration file for the maze
    #[clap(short)]
    config: Option<PathBuf>,
    /// Overrides of the configuration file
    #[clap(flatten)]
    overrides: PartialConfig,
}

fn cell_char(maze: &Maze, pos: Position) -> char {
    if pos == maze.start() {
        'S'
    } else if pos == maze.end() {
        'E'
    } else if maze.solution().contains(&pos) {
        '.'
    } else {
        ' '
    }
}

/// Plain text dump, two characters per cell
fn dump(maze: &Maze) -> String {
    let grid = maze.grid();
    let mut out = String::new();
    out.push('+');
    out.push_str(&"-+".repeat(grid.width()));
    out.push('\n');
    for row in 0..grid.height() {
        let mut cells = String::from("|");
        let mut floors = String::from("+");
        for col in 0..grid.width() {
            let pos = Position::new(row, col);
            let walls = grid.cell(pos).walls;
            cells.push(cell_char(maze, pos));
            cells.push(if walls.contains(Walls::Right) { '|' } else { ' ' });
            floors.push(if walls.contains(Walls::Bottom) { '-' } else { ' ' });
            floors.push('+');
        }
        out.push_str(&cells);
        out.push('\n');
        out.push_str(&floors);
        out.push('\n');
    }
    out
}

fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .without_timestamps()
        .with_level(if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .env()
        .init()
        .context("While initializing logging")?;

    let Args { config, overrides } = Args::parse();
    let from_file: PartialConfig = config
        .map(|path| {
            read_to_string(path)
                .context("Cannot read config file")
                .and_then(|s| toml::from_str(&s).context("Cannot parse config file"))
        })
        .transpose()
        .context("While loading configs")?
        .unwrap_or_default();
    let config = from_file.merge(overrides).or_defaults();
    config.validate().context("Invalid maze size")?;

    let maze = Maze::generate(&config);
    print!("{}", dump(&maze));
    let metrics = maze.metrics();
    println!("Solution length:   {}", metrics.solution_length);
    println!("Tortuosity:        {:.3}", metrics.tortuosity);
    println!(
        "Dead ends:         {} (mean depth {:.2}, max {})",
        maze.dead_ends().len(),
        metrics.average_dead_end_depth,
        metrics.max_dead_end_depth
    );
    println!("Decoys:            {}", metrics.decoy_count);
    println!("Complexity:        {:.1}/100", metrics.complexity);
    Ok(())
}
