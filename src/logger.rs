//! Plain-text solution and failure logs.
//!
//! Every solve can be archived as a timestamped `.txt` under `results/`:
//! algorithm and parameters, statistics, the initial and goal states, and
//! (for solved runs with path tracking) the step-by-step solution path.
//! Writing is best-effort; callers degrade to a console warning on error
//! and never let logging alter the solve outcome.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::puzzle::Puzzle;
use crate::report::ResultReport;
use crate::search::Algorithm;

const RESULTS_DIR: &str = "results";
const RULE_WIDTH: usize = 70;

/// Writes the report as a timestamped artifact under `results/`, creating
/// the directory if needed. Returns the path written.
pub fn write_report(puzzle: &Puzzle, report: &ResultReport) -> io::Result<PathBuf> {
    fs::create_dir_all(RESULTS_DIR)?;
    let path = Path::new(RESULTS_DIR).join(file_name(
        report.algorithm,
        report.solved(),
        &Local::now(),
    ));
    let mut file = File::create(&path)?;
    file.write_all(render(puzzle, report).as_bytes())?;
    Ok(path)
}

/// `<Algorithm>_<SUCCESS|FAILURE>_<YYYYMMDD_HHMMSS_mmm>.txt`, with spaces
/// flattened to `_` and `*` to `A` so names stay shell-friendly.
pub fn file_name(algorithm: Algorithm, success: bool, when: &DateTime<Local>) -> String {
    let clean = algorithm.name().replace(' ', "_").replace('*', "A");
    format!(
        "{}_{}_{}.txt",
        clean,
        if success { "SUCCESS" } else { "FAILURE" },
        when.format("%Y%m%d_%H%M%S_%3f")
    )
}

/// Renders the full log body.
pub fn render(puzzle: &Puzzle, report: &ResultReport) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&heavy);
    out.push('\n');
    out.push_str(if report.solved() {
        "N-PUZZLE SOLUTION LOG\n"
    } else {
        "N-PUZZLE FAILURE LOG\n"
    });
    out.push_str(&heavy);
    out.push_str("\n\n");

    out.push_str(&format!("Algorithm: {}\n", report.algorithm.name()));
    let heuristic_name = report.heuristic.name();
    if heuristic_name != "None (uninformed)" {
        out.push_str(&format!("Heuristic: {}\n", heuristic_name));
    }
    if let Some(weight) = report.weight {
        if weight != 1.0 {
            out.push_str(&format!("Weight: {}\n", weight));
        }
    }
    if let Some(width) = report.beam_width {
        out.push_str(&format!("Beam Width: {}\n", width));
    }
    out.push_str(&format!("Puzzle Size: {0}x{0}\n", puzzle.size()));

    out.push('\n');
    out.push_str(&light);
    out.push_str("\nSTATISTICS\n");
    out.push_str(&light);
    out.push('\n');
    if report.solved() {
        out.push_str("Solution Found: YES\n");
        out.push_str(&format!("Total Moves: {}\n", report.moves));
    } else {
        out.push_str("Solution Found: NO\n");
        out.push_str(&format!(
            "Failure Reason: {}\n",
            report.failure_reason().unwrap_or("Unknown")
        ));
    }
    out.push_str(&format!(
        "Time Complexity (states opened): {}\n",
        report.expanded
    ));
    out.push_str(&format!(
        "Space Complexity (max states in memory): {}\n",
        report.peak_in_memory
    ));
    out.push_str(&format!(
        "Execution Time: {:.4}s\n",
        report.elapsed.as_secs_f64()
    ));

    out.push('\n');
    out.push_str(&light);
    out.push_str("\nINITIAL STATE\n");
    out.push_str(&light);
    out.push('\n');
    out.push_str(&state_to_string(puzzle.grid(), puzzle.size()));

    out.push('\n');
    out.push_str(&light);
    out.push_str("\nGOAL STATE\n");
    out.push_str(&light);
    out.push('\n');
    out.push_str(&state_to_string(puzzle.goal(), puzzle.size()));

    if let Some(terminal) = &report.solution {
        out.push('\n');
        out.push_str(&light);
        out.push_str(&format!("\nSOLUTION PATH ({} moves)\n", report.moves));
        out.push_str(&light);
        out.push_str("\n\n");

        for (i, step) in terminal.lineage().iter().enumerate() {
            if i == 0 {
                out.push_str(&format!("Step {}: Initial State\n", i));
            } else {
                match step.action() {
                    Some(action) => out.push_str(&format!("Step {}: Move {}\n", i, action)),
                    None => out.push_str(&format!("Step {}\n", i)),
                }
            }
            out.push_str(&state_to_string(step.state(), puzzle.size()));
            out.push('\n');
        }
    }

    out.push('\n');
    out.push_str(&heavy);
    out.push_str(if report.solved() {
        "\nEND OF SOLUTION LOG\n"
    } else {
        "\nEND OF FAILURE LOG\n"
    });
    out.push_str(&heavy);
    out.push('\n');

    out
}

/// Renders a state as an aligned grid, `_` for the blank, indented four
/// spaces to sit inside the log sections.
fn state_to_string(state: &[u8], size: usize) -> String {
    let width = (size * size - 1).to_string().len();
    let mut out = String::new();

    for row in state.chunks(size) {
        out.push_str("    ");
        for (i, &tile) in row.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            if tile == 0 {
                out.push_str(&format!("{:>width$}", "_", width = width));
            } else {
                out.push_str(&format!("{:>width$}", tile, width = width));
            }
        }
        out.push('\n');
    }

    out
}
