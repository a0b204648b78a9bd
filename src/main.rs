//! N-Puzzle Solver
//!
//! Generates (or accepts) an n x n sliding-tile board and solves it with
//! one of five bounded best-first strategies. Prints the boards and the
//! outcome, and archives each run as a plain-text log under `results/`.

mod display;

use std::time::Duration;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use npuzzle::search::{self, SearchBudget, SearchConfig};
use npuzzle::{logger, Algorithm, Heuristic, Puzzle};

/// Solves an n x n sliding-tile puzzle with bounded best-first search.
#[derive(Parser)]
#[command(name = "npuzzle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board size n (3..=16)
    #[arg(short = 'n', long, default_value_t = 3)]
    size: usize,

    /// Search strategy
    #[arg(short, long, value_enum, default_value = "astar")]
    algorithm: Algorithm,

    /// Heuristic (ucs always runs uninformed)
    #[arg(short = 'H', long, value_enum, default_value = "manhattan")]
    heuristic: Heuristic,

    /// Weight for wastar; 1.0 behaves exactly like astar
    #[arg(long, default_value_t = search::DEFAULT_WEIGHT)]
    weight: f64,

    /// Beam width (k) for beam
    #[arg(long, default_value_t = search::DEFAULT_BEAM_WIDTH)]
    beam_width: usize,

    /// Shuffle iterations when generating a board
    #[arg(short, long, default_value_t = 10_000)]
    iterations: usize,

    /// Generate a provably unsolvable variant
    #[arg(long)]
    unsolvable: bool,

    /// RNG seed for reproducible generation
    #[arg(long)]
    seed: Option<u64>,

    /// Custom board as comma-separated tiles, row-major, 0 for the blank
    /// (e.g. "1,2,3,8,4,0,7,6,5"); must be a full permutation
    #[arg(long, value_name = "TILES", conflicts_with_all = ["iterations", "unsolvable", "seed"])]
    grid: Option<String>,

    /// Expansion budget (distinct states closed)
    #[arg(long, default_value_t = search::DEFAULT_MAX_EXPANSIONS)]
    max_expansions: usize,

    /// Wall-clock budget in seconds
    #[arg(long, default_value_t = 600)]
    max_seconds: u64,

    /// Skip writing the results/ log file
    #[arg(long)]
    no_log: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(message) = run(&cli) {
        eprintln!("{}", message);
        std::process::exit(2);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    if !(3..=16).contains(&cli.size) {
        return Err(format!(
            "board size must be between 3 and 16, got {}",
            cli.size
        ));
    }
    if !(0.1..=10.0).contains(&cli.weight) {
        return Err(format!(
            "weight must be between 0.1 and 10.0, got {}",
            cli.weight
        ));
    }
    if !(1..=10_000).contains(&cli.beam_width) {
        return Err(format!(
            "beam width must be between 1 and 10000, got {}",
            cli.beam_width
        ));
    }

    let mut puzzle = Puzzle::new(cli.size);
    if let Some(tiles) = &cli.grid {
        let grid = parse_grid(tiles)?;
        puzzle
            .set_grid(grid)
            .map_err(|error| format!("invalid custom grid: {}", error))?;
    } else {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        puzzle.generate(!cli.unsolvable, cli.iterations, &mut rng);
    }

    let mut config = SearchConfig::new(cli.algorithm, cli.heuristic);
    config.weight = cli.weight;
    config.beam_width = cli.beam_width;
    config.budget = SearchBudget {
        max_expansions: cli.max_expansions,
        max_time: Duration::from_secs(cli.max_seconds),
    };
    config.track_path = !cli.no_log;

    display::print_recap(&puzzle, &config);
    display::print_boards(&puzzle);

    let report = search::solve(&puzzle, &config, &mut display::ConsoleObserver);
    display::print_report(&report);

    if !cli.no_log {
        match logger::write_report(&puzzle, &report) {
            Ok(path) => println!("Log saved to {}", path.display()),
            Err(error) => warn!(%error, "could not write the solution log"),
        }
    }

    Ok(())
}

/// Parses a comma-separated tile list; permutation validity is enforced at
/// injection by [`Puzzle::set_grid`].
fn parse_grid(input: &str) -> Result<Vec<u8>, String> {
    input
        .split(',')
        .map(|token| {
            let token = token.trim();
            token
                .parse::<u8>()
                .map_err(|_| format!("invalid tile value '{}'", token))
        })
        .collect()
}
