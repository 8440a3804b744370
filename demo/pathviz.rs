//! Terminal pathfinding visualizer.
//!
//! Run: cargo run --bin pathviz -- --algorithm astar --seed 42

use clap::Parser;

use gridsearch_demo::{DEFAULT_DELAY, Visualizer};
use gridsearch_engine::{
    Algorithm, DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_WALL_PROBABILITY, EngineConfig,
};
use gridsearch_term::{App, AppConfig, CrosstermDriver};

/// Step through BFS, DFS, Dijkstra and A* on a random maze.
#[derive(Parser, Debug)]
#[command(name = "pathviz", version)]
#[command(about = "Step through BFS, DFS, Dijkstra and A* on a random maze")]
struct Args {
    /// Grid height in cells.
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: i32,

    /// Grid width in cells.
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: i32,

    /// Chance that a cell becomes a wall, in [0, 1].
    #[arg(short = 'w', long, default_value_t = DEFAULT_WALL_PROBABILITY)]
    wall_probability: f64,

    /// Search algorithm: bfs, dfs, dijkstra or astar.
    #[arg(short, long, default_value = "bfs")]
    algorithm: Algorithm,

    /// Seed for wall generation; every reset reuses it.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Seconds between steps, clamped to [0.01, 0.5].
    #[arg(short, long, default_value_t = DEFAULT_DELAY)]
    delay: f64,

    /// Do not capture the mouse.
    #[arg(long)]
    no_mouse: bool,
}

fn main() {
    let args = Args::parse();
    let config = EngineConfig::default()
        .with_size(args.rows, args.cols)
        .with_wall_probability(args.wall_probability)
        .with_algorithm(args.algorithm)
        .with_seed(args.seed);

    let model = match Visualizer::new(config, args.delay) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };
    let (rows, cols) = model.canvas_size();
    let mut app = App::new(AppConfig {
        model,
        driver: CrosstermDriver::new().with_mouse(!args.no_mouse),
        rows,
        cols,
    });

    if let Err(e) = app.run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
