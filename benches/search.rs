//! Benchmarks for the n-puzzle heuristics and search engines.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use npuzzle::heuristic::{GoalLookup, Heuristic};
use npuzzle::search::{solve_silent, Algorithm, SearchConfig};
use npuzzle::Puzzle;

/// A reproducibly scrambled solvable board.
fn scrambled(size: usize, iterations: usize, seed: u64) -> Puzzle {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut puzzle = Puzzle::new(size);
    puzzle.generate(true, iterations, &mut rng);
    puzzle
}

/// Benchmark the heuristic estimators on a well-mixed 4x4 state.
fn bench_heuristics(c: &mut Criterion) {
    let puzzle = scrambled(4, 2_000, 97);
    let lookup = GoalLookup::new(puzzle.goal(), puzzle.size());

    c.bench_function("manhattan_4x4", |b| {
        b.iter(|| Heuristic::Manhattan.evaluate(black_box(puzzle.grid()), &lookup, 4))
    });
    c.bench_function("linear_conflict_4x4", |b| {
        b.iter(|| Heuristic::LinearConflict.evaluate(black_box(puzzle.grid()), &lookup, 4))
    });
}

/// Benchmark neighbor expansion on its own.
fn bench_neighbors(c: &mut Criterion) {
    let puzzle = scrambled(4, 500, 107);
    let blank = puzzle.blank_pos();

    c.bench_function("neighbors_4x4", |b| {
        b.iter(|| puzzle.neighbors(black_box(puzzle.grid()), blank))
    });
}

/// Benchmark a complete informed solve.
fn bench_astar(c: &mut Criterion) {
    let puzzle = scrambled(3, 40, 101);
    let config = SearchConfig::new(Algorithm::AStar, Heuristic::LinearConflict);

    c.bench_function("astar_linear_conflict_3x3", |b| {
        b.iter(|| solve_silent(black_box(&puzzle), &config))
    });
}

/// Benchmark the uninformed baseline, which expands far more states.
fn bench_uniform_cost(c: &mut Criterion) {
    let puzzle = scrambled(3, 20, 103);
    let config = SearchConfig::new(Algorithm::UniformCost, Heuristic::Uninformed);

    let mut group = c.benchmark_group("uninformed");
    group.sample_size(10);
    group.bench_function("ucs_3x3", |b| {
        b.iter(|| solve_silent(black_box(&puzzle), &config))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_heuristics,
    bench_neighbors,
    bench_astar,
    bench_uniform_cost
);
criterion_main!(benches);
