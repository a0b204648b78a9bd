//! Terminal rendering for boards, progress events and solve reports.
//!
//! Reads only the puzzle's 2-D row views and the final report; all search
//! progress arrives through the [`SearchObserver`] events.

use std::time::Duration;

use crossterm::style::Stylize;

use npuzzle::report::{ResultReport, SearchOutcome};
use npuzzle::search::{Algorithm, SearchBudget, SearchConfig, SearchObserver};
use npuzzle::Puzzle;

const RULE_WIDTH: usize = 50;

/// One-line recap of the configured run.
pub fn print_recap(puzzle: &Puzzle, config: &SearchConfig) {
    let size = puzzle.size();
    let mut line = format!("{}x{} puzzle, {}", size, size, config.algorithm.name());
    match config.algorithm {
        Algorithm::UniformCost => {}
        _ => line.push_str(&format!(", {}", config.heuristic.name())),
    }
    if config.algorithm == Algorithm::WeightedAStar {
        line.push_str(&format!(", weight {}", config.weight));
    }
    if config.algorithm == Algorithm::BeamSearch {
        line.push_str(&format!(", beam width {}", config.beam_width));
    }
    println!("{}", line.bold());
}

/// Prints the initial grid and the goal side by side.
pub fn print_boards(puzzle: &Puzzle) {
    let size = puzzle.size();
    let cell = (size * size - 1).to_string().len();
    let board_width = size * (cell + 1) - 1;

    println!();
    println!(
        "{}   {}",
        format!("{:<width$}", "Initial", width = board_width).cyan().bold(),
        "Goal".cyan().bold()
    );
    for (grid_row, goal_row) in puzzle.grid_rows().zip(puzzle.goal_rows()) {
        println!("{}   {}", format_row(grid_row, cell), format_row(goal_row, cell));
    }
    println!();
}

/// Renders one row with fixed-width cells; the blank shows as a dimmed `_`.
fn format_row(row: &[u8], cell: usize) -> String {
    let mut out = String::new();
    for (i, &tile) in row.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        if tile == 0 {
            out.push_str(&format!("{:>width$}", "_", width = cell).yellow().to_string());
        } else {
            out.push_str(&format!("{:>width$}", tile, width = cell));
        }
    }
    out
}

/// Final summary block for any outcome.
pub fn print_report(report: &ResultReport) {
    let rule = "=".repeat(RULE_WIDTH);

    println!();
    println!("{}", rule);
    match report.outcome {
        SearchOutcome::Solved => println!("{}", "Solution found!".green().bold()),
        SearchOutcome::AlreadySolved => {
            println!("{}", "Puzzle is already solved!".green().bold())
        }
        _ => println!(
            "{}",
            report
                .failure_reason()
                .unwrap_or("No solution found")
                .red()
                .bold()
        ),
    }
    println!("{}", rule);
    if report.solved() {
        println!("Total moves required: {}", report.moves);
    }
    println!("Total states opened (time complexity): {}", report.expanded);
    println!(
        "Maximum states in memory (space complexity): {}",
        report.peak_in_memory
    );
    if let Some(weight) = report.weight {
        println!("Weight: {}", weight);
    }
    if let Some(width) = report.beam_width {
        println!("Beam width (k): {}", width);
    }
    println!("Execution time: {:.4}s", report.elapsed.as_secs_f64());
    println!("{}", rule);
}

/// Observer that narrates engine events on stdout.
pub struct ConsoleObserver;

impl SearchObserver for ConsoleObserver {
    fn budget_established(&mut self, budget: &SearchBudget) {
        println!(
            "{} max {} expansions, {}s wall clock",
            "[budget]".dark_grey(),
            budget.max_expansions,
            budget.max_time.as_secs_f64()
        );
    }

    fn timed_out(&mut self, elapsed: Duration, expanded: usize) {
        println!(
            "{} explored {} states in {:.4}s",
            "[timeout]".red().bold(),
            expanded,
            elapsed.as_secs_f64()
        );
    }

    fn budget_exceeded(&mut self, expanded: usize) {
        println!(
            "{} explored {} states before hitting the limit",
            "[budget exceeded]".red().bold(),
            expanded
        );
    }

    fn solved(&mut self, moves: u32, expanded: usize) {
        println!(
            "{} {} moves, {} states opened",
            "[solved]".green().bold(),
            moves,
            expanded
        );
    }

    fn exhausted(&mut self, expanded: usize) {
        println!(
            "{} frontier emptied after {} states",
            "[exhausted]".red().bold(),
            expanded
        );
    }
}
