//! N-Puzzle Solver Library
//!
//! Core machinery for the sliding-tile puzzle: board state and solvability
//! testing, heuristic evaluation, and a family of five bounded best-first
//! search strategies (A*, uniform-cost, greedy, weighted A*, beam) sharing
//! one expansion and termination skeleton.
//!
//! A solve call always returns a [`report::ResultReport`]; resource-limit
//! outcomes are data, never errors, so callers can present every result
//! uniformly and retry with larger budgets when it makes sense.

pub mod heuristic;
pub mod logger;
pub mod node;
pub mod puzzle;
pub mod report;
pub mod search;

pub use heuristic::Heuristic;
pub use puzzle::Puzzle;
pub use report::{ResultReport, SearchOutcome};
pub use search::{solve, solve_silent, Algorithm, SearchBudget, SearchConfig, SearchObserver};
