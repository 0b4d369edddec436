//! Generate a map and print it to stdout.
//!
//! Run: cargo run --bin delve-dump -- dungeon --seed 7 --fov 8

use clap::{Parser, ValueEnum};
use delve_core::{Grid, Point, Rect, Tile};
use delve_rl::{Cave, Dungeon, Fov, Generator, Maze, MazeAlgo};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    MazeDfs,
    MazePrim,
    Cave,
    Dungeon,
}

/// Dump a generated map as text.
#[derive(Debug, Parser)]
struct Args {
    /// What to generate.
    #[arg(value_enum, default_value_t = Kind::Dungeon)]
    kind: Kind,
    /// Random seed.
    #[arg(long, default_value_t = 1)]
    seed: u64,
    #[arg(long, default_value_t = 61)]
    width: i32,
    #[arg(long, default_value_t = 31)]
    height: i32,
    /// Dungeon loop chance, 0.0 to 1.0.
    #[arg(long, default_value_t = 0.0)]
    sparsity: f64,
    /// Show only what is visible within this radius from the first floor
    /// cell.
    #[arg(long)]
    fov: Option<i32>,
    /// Log generation details to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn generate(args: &Args, grid: &mut Grid, bounds: Rect) -> delve_rl::Result<()> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    match args.kind {
        Kind::MazeDfs => Maze::new(MazeAlgo::Dfs).generate(grid, bounds, &mut rng),
        Kind::MazePrim => Maze::new(MazeAlgo::Prim).generate(grid, bounds, &mut rng),
        Kind::Cave => Cave::default().generate(grid, bounds, &mut rng),
        Kind::Dungeon => Dungeon {
            sparsity: args.sparsity,
            ..Dungeon::default()
        }
        .generate(grid, bounds, &mut rng),
    }
}

fn render(grid: &Grid, bounds: Rect, fov_radius: Option<i32>) -> String {
    let Some(radius) = fov_radius else {
        return grid.render(bounds);
    };
    let Some(&origin) = grid.points_of(Tile::Floor).first() else {
        return grid.render(bounds);
    };
    let mut fov = Fov::new();
    fov.vision(origin, radius, |p| grid.opaque(p));
    grid.render_with(bounds, |p: Point, t| {
        if p == origin {
            '@'
        } else if fov.visible(p) {
            t.symbol()
        } else {
            ' '
        }
    })
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Warn
    };
    if let Err(e) = simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("Error: {e}");
    }

    let bounds = Rect::new(0, 0, args.width, args.height);
    let mut grid = Grid::new();
    if let Err(e) = generate(&args, &mut grid, bounds) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    log::info!(
        "{:?} seed {}: {} floor, {} doors, {} arches",
        args.kind,
        args.seed,
        grid.count(Tile::Floor),
        grid.count(Tile::Door),
        grid.count(Tile::Arch)
    );

    println!("{}", render(&grid, bounds, args.fov));
}
