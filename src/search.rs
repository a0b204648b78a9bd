//! The bounded best-first search engine family.
//!
//! Five strategies share one expansion/termination skeleton and differ only
//! in how the frontier is ordered: uniform-cost ranks by path cost, A* by
//! cost plus estimate, greedy by the estimate alone, weighted A* by cost
//! plus a scaled estimate, and beam search runs synchronous rounds that
//! keep only the `k` best children. Every variant runs under the same
//! resource budget: a wall-clock limit polled once per iteration and an
//! expansion limit that stands in for memory (distinct states touched, not
//! bytes measured).
//!
//! Outcomes are always returned as data in a [`ResultReport`]; budget and
//! timeout results are recoverable by retrying with larger limits.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use clap::ValueEnum;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::heuristic::{GoalLookup, Heuristic};
use crate::node::Node;
use crate::puzzle::Puzzle;
use crate::report::{ResultReport, SearchOutcome};

/// Default expansion budget: the memory-safety proxy of the engine.
pub const DEFAULT_MAX_EXPANSIONS: usize = 30_000_000;

/// Default wall-clock budget.
pub const DEFAULT_MAX_TIME: Duration = Duration::from_secs(600);

/// Default weight for weighted A*.
pub const DEFAULT_WEIGHT: f64 = 1.5;

/// Default beam width (k) for beam search.
pub const DEFAULT_BEAM_WIDTH: usize = 100;

/// The five search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// A*: optimal with an admissible heuristic.
    #[value(name = "astar")]
    AStar,
    /// Uniform-cost search (Dijkstra); ignores any configured heuristic.
    #[value(name = "ucs")]
    UniformCost,
    /// Greedy best-first: ranks by the estimate alone.
    Greedy,
    /// Weighted A*: `g + weight * h`; weight 1.0 degenerates to A*.
    #[value(name = "wastar")]
    WeightedAStar,
    /// Beam search: fixed-width synchronous rounds, incomplete.
    #[value(name = "beam")]
    BeamSearch,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::AStar,
        Algorithm::UniformCost,
        Algorithm::Greedy,
        Algorithm::WeightedAStar,
        Algorithm::BeamSearch,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::AStar => "A*",
            Algorithm::UniformCost => "Uniform Cost Search",
            Algorithm::Greedy => "Greedy Search",
            Algorithm::WeightedAStar => "Weighted A*",
            Algorithm::BeamSearch => "Beam Search",
        }
    }

    /// Frontier order key; lower is better. Greedy reads `h` alone here
    /// while `g` keeps its path-length meaning on the node, so reported
    /// move counts stay truthful for every variant.
    fn order_key(self, g: u32, h: u32, weight: f64) -> f64 {
        match self {
            Algorithm::UniformCost => g as f64,
            Algorithm::AStar => (g + h) as f64,
            Algorithm::Greedy => h as f64,
            Algorithm::WeightedAStar => g as f64 + weight * h as f64,
            Algorithm::BeamSearch => h as f64,
        }
    }

    /// Uniform-cost forces the estimate to zero; every other variant uses
    /// the requested heuristic.
    fn effective_heuristic(self, requested: Heuristic) -> Heuristic {
        match self {
            Algorithm::UniformCost => Heuristic::Uninformed,
            _ => requested,
        }
    }
}

/// Resource limits for one solve call. Both are overridable; the defaults
/// match the engine's documented safety limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    /// Maximum distinct states closed before giving up.
    pub max_expansions: usize,
    /// Maximum wall-clock time, polled once per loop iteration.
    pub max_time: Duration,
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self {
            max_expansions: DEFAULT_MAX_EXPANSIONS,
            max_time: DEFAULT_MAX_TIME,
        }
    }
}

/// Full configuration of one solve call.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    pub heuristic: Heuristic,
    /// Weight for weighted A*; ignored by the other variants.
    pub weight: f64,
    /// Beam width (k) for beam search; ignored by the other variants.
    pub beam_width: usize,
    pub budget: SearchBudget,
    /// When set, nodes keep parent links so the solution path can be
    /// reconstructed for logging; otherwise nodes stay lean.
    pub track_path: bool,
}

impl SearchConfig {
    pub fn new(algorithm: Algorithm, heuristic: Heuristic) -> Self {
        Self {
            algorithm,
            heuristic,
            weight: DEFAULT_WEIGHT,
            beam_width: DEFAULT_BEAM_WIDTH,
            budget: SearchBudget::default(),
            track_path: false,
        }
    }
}

/// Progress events emitted by the engine. All methods default to no-ops so
/// observers implement only what they present; the engine itself never
/// writes to the console.
pub trait SearchObserver {
    fn budget_established(&mut self, _budget: &SearchBudget) {}
    fn timed_out(&mut self, _elapsed: Duration, _expanded: usize) {}
    fn budget_exceeded(&mut self, _expanded: usize) {}
    fn solved(&mut self, _moves: u32, _expanded: usize) {}
    fn exhausted(&mut self, _expanded: usize) {}
}

/// Observer that swallows every event.
pub struct SilentObserver;

impl SearchObserver for SilentObserver {}

/// Runs one solve call with no progress reporting.
pub fn solve_silent(puzzle: &Puzzle, config: &SearchConfig) -> ResultReport {
    solve(puzzle, config, &mut SilentObserver)
}

/// Runs one solve call to a terminal outcome.
///
/// Preconditions (the caller's responsibility, validated at the input
/// boundary and not re-verified here): the grid is a full permutation of
/// `0..size*size`.
pub fn solve(
    puzzle: &Puzzle,
    config: &SearchConfig,
    observer: &mut dyn SearchObserver,
) -> ResultReport {
    let mut run = EngineState {
        puzzle,
        config,
        heuristic: config.algorithm.effective_heuristic(config.heuristic),
        lookup: GoalLookup::new(puzzle.goal(), puzzle.size()),
        started: Instant::now(),
        expanded: 0,
        peak: 0,
    };
    debug!(
        algorithm = config.algorithm.name(),
        heuristic = run.heuristic.name(),
        "solve started"
    );

    let report = if puzzle.grid() == puzzle.goal() {
        run.report(SearchOutcome::AlreadySolved, 0, None)
    } else if !puzzle.is_solvable() {
        run.report(SearchOutcome::DeclaredUnsolvable, 0, None)
    } else {
        observer.budget_established(&config.budget);
        match config.algorithm {
            Algorithm::BeamSearch => beam_search(&mut run, observer),
            _ => best_first(&mut run, observer),
        }
    };

    debug!(
        outcome = ?report.outcome,
        expanded = report.expanded,
        moves = report.moves,
        "solve finished"
    );
    report
}

/// Frontier entry: the policy's order key plus the node it ranks.
struct OpenEntry {
    key: f64,
    node: Rc<Node>,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key.total_cmp(&other.key).is_eq()
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.total_cmp(&other.key)
    }
}

/// Per-call engine state shared by both expansion modes.
struct EngineState<'a> {
    puzzle: &'a Puzzle,
    config: &'a SearchConfig,
    heuristic: Heuristic,
    lookup: GoalLookup,
    started: Instant,
    expanded: usize,
    peak: usize,
}

impl EngineState<'_> {
    fn key(&self, node: &Node) -> f64 {
        self.config
            .algorithm
            .order_key(node.g(), node.h(), self.config.weight)
    }

    fn estimate(&self, state: &[u8]) -> u32 {
        self.heuristic.evaluate(state, &self.lookup, self.puzzle.size())
    }

    fn out_of_time(&self) -> bool {
        self.started.elapsed() > self.config.budget.max_time
    }

    fn out_of_expansions(&self) -> bool {
        self.expanded >= self.config.budget.max_expansions
    }

    fn report(
        &self,
        outcome: SearchOutcome,
        moves: u32,
        solution: Option<Rc<Node>>,
    ) -> ResultReport {
        ResultReport {
            outcome,
            moves,
            expanded: self.expanded,
            peak_in_memory: self.peak,
            elapsed: self.started.elapsed(),
            algorithm: self.config.algorithm,
            heuristic: self.heuristic,
            weight: (self.config.algorithm == Algorithm::WeightedAStar)
                .then_some(self.config.weight),
            beam_width: (self.config.algorithm == Algorithm::BeamSearch)
                .then_some(self.config.beam_width),
            solution,
        }
    }
}

/// Graph search over an unbounded frontier ordered by the variant's key.
///
/// Cost improvements re-push a fresh entry instead of decreasing keys in
/// place; the stale higher-cost entries stay behind and are skipped at pop
/// through the closed set.
fn best_first(run: &mut EngineState<'_>, observer: &mut dyn SearchObserver) -> ResultReport {
    let puzzle = run.puzzle;
    let goal = puzzle.goal();
    let track_path = run.config.track_path;

    let root_state = puzzle.grid().to_vec();
    let root_blank = puzzle.blank_pos();
    let root_h = run.estimate(&root_state);
    let root = Rc::new(Node::root(root_state, root_blank, root_h));

    let mut open = BinaryHeap::new();
    let mut closed: FxHashSet<Vec<u8>> = FxHashSet::default();
    let mut best_g: FxHashMap<Vec<u8>, u32> = FxHashMap::default();

    best_g.insert(root.state().to_vec(), 0);
    open.push(Reverse(OpenEntry {
        key: run.key(&root),
        node: root,
    }));

    loop {
        run.peak = run.peak.max(open.len());

        if run.out_of_time() {
            observer.timed_out(run.started.elapsed(), run.expanded);
            return run.report(SearchOutcome::TimedOut, 0, None);
        }
        if run.out_of_expansions() {
            observer.budget_exceeded(run.expanded);
            return run.report(SearchOutcome::BudgetExceeded, 0, None);
        }

        let Some(Reverse(entry)) = open.pop() else {
            observer.exhausted(run.expanded);
            return run.report(SearchOutcome::Exhausted, 0, None);
        };
        let node = entry.node;

        if node.state() == goal {
            let moves = node.g();
            observer.solved(moves, run.expanded);
            return run.report(SearchOutcome::Solved, moves, track_path.then_some(node));
        }

        if closed.contains(node.state()) {
            // stale duplicate from a cost-improving reinsertion
            continue;
        }
        closed.insert(node.state().to_vec());
        run.expanded += 1;

        for neighbor in puzzle.neighbors(node.state(), node.blank()) {
            let g = node.g() + 1;
            if closed.contains(&neighbor.state) {
                continue;
            }
            if best_g.get(&neighbor.state).is_some_and(|&known| known <= g) {
                continue;
            }
            let h = run.estimate(&neighbor.state);
            best_g.insert(neighbor.state.clone(), g);
            let child = Rc::new(Node::child(
                &node,
                neighbor.state,
                neighbor.blank,
                h,
                neighbor.action,
                track_path,
            ));
            open.push(Reverse(OpenEntry {
                key: run.key(&child),
                node: child,
            }));
        }
    }
}

/// Synchronous fixed-width rounds: expand the whole beam, pool every child,
/// keep the `k` with the lowest estimates. Memory stays O(k) per round but
/// the search is incomplete; a round with zero children means the beam
/// discarded every continuation and the search is exhausted.
fn beam_search(run: &mut EngineState<'_>, observer: &mut dyn SearchObserver) -> ResultReport {
    let puzzle = run.puzzle;
    let goal = puzzle.goal();
    let track_path = run.config.track_path;
    let width = run.config.beam_width.max(1);

    let root_state = puzzle.grid().to_vec();
    let root_blank = puzzle.blank_pos();
    let root_h = run.estimate(&root_state);
    let mut beam = vec![Rc::new(Node::root(root_state, root_blank, root_h))];
    let mut closed: FxHashSet<Vec<u8>> = FxHashSet::default();
    run.peak = 1;

    loop {
        if run.out_of_time() {
            observer.timed_out(run.started.elapsed(), run.expanded);
            return run.report(SearchOutcome::TimedOut, 0, None);
        }
        if run.out_of_expansions() {
            observer.budget_exceeded(run.expanded);
            return run.report(SearchOutcome::BudgetExceeded, 0, None);
        }

        let mut candidates: Vec<Rc<Node>> = Vec::new();

        for node in &beam {
            if node.state() == goal {
                let moves = node.g();
                observer.solved(moves, run.expanded);
                return run.report(
                    SearchOutcome::Solved,
                    moves,
                    track_path.then(|| Rc::clone(node)),
                );
            }

            if closed.contains(node.state()) {
                continue;
            }
            closed.insert(node.state().to_vec());
            run.expanded += 1;

            for neighbor in puzzle.neighbors(node.state(), node.blank()) {
                if closed.contains(&neighbor.state) {
                    continue;
                }
                let h = run.estimate(&neighbor.state);
                candidates.push(Rc::new(Node::child(
                    node,
                    neighbor.state,
                    neighbor.blank,
                    h,
                    neighbor.action,
                    track_path,
                )));
            }
        }

        if candidates.is_empty() {
            observer.exhausted(run.expanded);
            return run.report(SearchOutcome::Exhausted, 0, None);
        }

        candidates.sort_by_key(|node| node.h());
        candidates.truncate(width);
        beam = candidates;
        run.peak = run.peak.max(beam.len());
    }
}
