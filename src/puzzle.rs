//! Board state for the sliding-tile puzzle.
//!
//! Grids are flat row-major `u8` arrays where 0 is the blank, so boards up
//! to 16x16 fit in byte-sized labels. The goal layout is the "snail" spiral:
//! tiles wind clockwise toward the center and the blank comes last.

use std::fmt;

use rand::Rng;
use thiserror::Error;

/// A sliding direction for the blank tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All moves in expansion order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Row/column delta applied to the blank position.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        write!(f, "{}", name)
    }
}

/// A successor state produced by sliding one tile into the blank.
#[derive(Debug, Clone)]
pub struct Neighbor {
    /// The state after the swap.
    pub state: Vec<u8>,
    /// Blank position in the new state.
    pub blank: usize,
    /// The move that produced it.
    pub action: Move,
}

/// Rejected custom grid at the injection boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("expected {expected} tiles, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("tile value {0} is out of range for this board")]
    ValueOutOfRange(u8),
    #[error("tile value {0} appears more than once")]
    DuplicateTile(u8),
}

/// An n x n sliding-tile board with its canonical goal.
///
/// The goal and its parity bit are computed once at construction and never
/// change. The grid starts equal to the goal and is mutated only through
/// [`Puzzle::generate`] or [`Puzzle::set_grid`].
#[derive(Debug, Clone)]
pub struct Puzzle {
    size: usize,
    grid: Vec<u8>,
    goal: Vec<u8>,
    goal_parity: usize,
}

impl Puzzle {
    /// Creates a solved board of the given size. `size` must be in `2..=16`.
    pub fn new(size: usize) -> Self {
        assert!((2..=16).contains(&size), "board size must be in 2..=16");
        let goal = snail_goal(size);
        let goal_parity = parity_term(&goal, size);
        let grid = goal.clone();
        Self {
            size,
            grid,
            goal,
            goal_parity,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Current state, flat row-major.
    pub fn grid(&self) -> &[u8] {
        &self.grid
    }

    /// Goal state, flat row-major.
    pub fn goal(&self) -> &[u8] {
        &self.goal
    }

    /// Read-only 2-D view of the current state, one slice per row.
    pub fn grid_rows(&self) -> impl Iterator<Item = &[u8]> {
        self.grid.chunks(self.size)
    }

    /// Read-only 2-D view of the goal, one slice per row.
    pub fn goal_rows(&self) -> impl Iterator<Item = &[u8]> {
        self.goal.chunks(self.size)
    }

    /// Flat index of the blank in the current state.
    pub fn blank_pos(&self) -> usize {
        blank_of(&self.grid)
    }

    pub fn is_solved(&self) -> bool {
        self.grid == self.goal
    }

    /// Regenerates the grid by a random walk of `iterations` adjacent blank
    /// swaps starting from the goal. The walk never immediately undoes its
    /// previous swap when another direction exists, and it preserves
    /// solvability by construction. With `solvable == false`, two adjacent
    /// non-blank tiles are swapped once afterwards, which flips the
    /// permutation parity and guarantees the result is unsolvable.
    pub fn generate(&mut self, solvable: bool, iterations: usize, rng: &mut impl Rng) {
        self.grid.copy_from_slice(&self.goal);
        self.random_walk(iterations, rng);

        if !solvable {
            let ts = self.size * self.size;
            if self.grid[0] == 0 || self.grid[1] == 0 {
                self.grid.swap(ts - 1, ts - 2);
            } else {
                self.grid.swap(0, 1);
            }
        }
    }

    fn random_walk(&mut self, iterations: usize, rng: &mut impl Rng) {
        let mut blank = blank_of(&self.grid);
        let mut prev: Option<usize> = None;

        for _ in 0..iterations {
            let mut options = self.adjacent_indices(blank);
            if options.len() > 1 {
                options.retain(|&idx| Some(idx) != prev);
            }
            let next = options[rng.gen_range(0..options.len())];
            self.grid.swap(blank, next);
            prev = Some(blank);
            blank = next;
        }
    }

    /// Flat indices adjacent to `pos`, in left/right/up/down order.
    fn adjacent_indices(&self, pos: usize) -> Vec<usize> {
        let size = self.size;
        let row = pos / size;
        let col = pos % size;
        let mut out = Vec::with_capacity(4);
        if col > 0 {
            out.push(pos - 1);
        }
        if col < size - 1 {
            out.push(pos + 1);
        }
        if row > 0 {
            out.push(pos - size);
        }
        if row < size - 1 {
            out.push(pos + size);
        }
        out
    }

    /// Injects a caller-provided grid after validating it is a full
    /// permutation of `0..size*size`.
    pub fn set_grid(&mut self, grid: Vec<u8>) -> Result<(), GridError> {
        let expected = self.size * self.size;
        if grid.len() != expected {
            return Err(GridError::WrongLength {
                expected,
                actual: grid.len(),
            });
        }
        let mut seen = vec![false; expected];
        for &tile in &grid {
            let tile_idx = tile as usize;
            if tile_idx >= expected {
                return Err(GridError::ValueOutOfRange(tile));
            }
            if seen[tile_idx] {
                return Err(GridError::DuplicateTile(tile));
            }
            seen[tile_idx] = true;
        }
        self.grid = grid;
        Ok(())
    }

    /// Whether the current grid can reach the goal.
    ///
    /// Inversions are counted relative to the goal ordering (each tile
    /// ranked by its goal position, not its face value). Odd boards compare
    /// `inversions mod 2` against the cached goal parity; even boards add
    /// the blank's row measured from the bottom. O(n^4) pair scan.
    pub fn is_solvable(&self) -> bool {
        let inversions = self.count_inversions(&self.grid);
        let parity = if self.size % 2 == 1 {
            inversions % 2
        } else {
            let blank_row = blank_of(&self.grid) / self.size;
            (inversions + (self.size - blank_row)) % 2
        };
        parity == self.goal_parity
    }

    fn count_inversions(&self, grid: &[u8]) -> usize {
        let ts = self.size * self.size;
        let mut goal_position = vec![0usize; ts];
        for (i, &tile) in self.goal.iter().enumerate() {
            if tile != 0 {
                goal_position[tile as usize] = i;
            }
        }

        let tiles: Vec<u8> = grid.iter().copied().filter(|&t| t != 0).collect();
        let mut inversions = 0;
        for i in 0..tiles.len() {
            for j in i + 1..tiles.len() {
                if goal_position[tiles[i] as usize] > goal_position[tiles[j] as usize] {
                    inversions += 1;
                }
            }
        }
        inversions
    }

    /// Enumerates the up-to-4 successor states of `state`, bounded by the
    /// grid edges. `blank` must be the position of 0 in `state`.
    pub fn neighbors(&self, state: &[u8], blank: usize) -> Vec<Neighbor> {
        let size = self.size;
        let row = (blank / size) as isize;
        let col = (blank % size) as isize;
        let mut out = Vec::with_capacity(4);

        for action in Move::ALL {
            let (dr, dc) = action.offset();
            let new_row = row + dr;
            let new_col = col + dc;
            if new_row < 0 || new_row >= size as isize || new_col < 0 || new_col >= size as isize {
                continue;
            }
            let target = new_row as usize * size + new_col as usize;
            let mut next = state.to_vec();
            next.swap(blank, target);
            out.push(Neighbor {
                state: next,
                blank: target,
                action,
            });
        }
        out
    }
}

/// Flat index of the blank (label 0).
pub fn blank_of(state: &[u8]) -> usize {
    state.iter().position(|&t| t == 0).unwrap_or(0)
}

/// Parity contribution of a state with zero inversions: 0 for odd boards,
/// the blank-row-from-bottom term for even ones. The goal is inversion-free
/// relative to itself by definition, so this is the cached goal parity.
fn parity_term(state: &[u8], size: usize) -> usize {
    if size % 2 == 1 {
        0
    } else {
        let blank_row = blank_of(state) / size;
        (size - blank_row) % 2
    }
}

/// Builds the snail/spiral goal: 1, 2, ... winding clockwise from the top
/// left, with the blank on the final cell of the walk.
fn snail_goal(size: usize) -> Vec<u8> {
    let s = size as i32;
    let ts = (size * size) as i32;
    let mut goal = vec![-1i32; size * size];

    let mut cur = 1i32;
    let (mut x, mut y) = (0i32, 0i32);
    let (mut ix, mut iy) = (1i32, 0i32);

    loop {
        goal[(x + y * s) as usize] = cur;
        if cur == 0 {
            break;
        }
        cur += 1;

        // turn at the edge or when the next cell along is already filled
        if x + ix == s || x + ix < 0 || (ix != 0 && goal[(x + ix + y * s) as usize] != -1) {
            iy = ix;
            ix = 0;
        } else if y + iy == s || y + iy < 0 || (iy != 0 && goal[(x + (y + iy) * s) as usize] != -1)
        {
            ix = -iy;
            iy = 0;
        }

        x += ix;
        y += iy;

        if cur == ts {
            cur = 0;
        }
    }

    goal.into_iter().map(|v| v as u8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn snail_goal_3x3() {
        let puzzle = Puzzle::new(3);
        assert_eq!(puzzle.goal(), &[1, 2, 3, 8, 0, 4, 7, 6, 5]);
    }

    #[test]
    fn snail_goal_4x4() {
        let puzzle = Puzzle::new(4);
        assert_eq!(
            puzzle.goal(),
            &[1, 2, 3, 4, 12, 13, 14, 5, 11, 0, 15, 6, 10, 9, 8, 7]
        );
    }

    #[test]
    fn snail_goal_2x2() {
        let puzzle = Puzzle::new(2);
        assert_eq!(puzzle.goal(), &[1, 2, 0, 3]);
    }

    #[test]
    fn new_board_is_solved_and_solvable() {
        for size in [2, 3, 4, 5] {
            let puzzle = Puzzle::new(size);
            assert!(puzzle.is_solved(), "{}x{} goal should be solved", size, size);
            assert!(puzzle.is_solvable(), "{}x{} goal should be solvable", size, size);
        }
    }

    #[test]
    fn generated_solvable_boards_pass_the_parity_check() {
        for size in [3, 4, 5] {
            let mut rng = StdRng::seed_from_u64(7);
            let mut puzzle = Puzzle::new(size);
            puzzle.generate(true, 200, &mut rng);
            assert!(puzzle.is_solvable(), "{}x{} shuffle broke solvability", size, size);
        }
    }

    #[test]
    fn generated_unsolvable_boards_fail_the_parity_check() {
        for size in [3, 4, 5] {
            let mut rng = StdRng::seed_from_u64(11);
            let mut puzzle = Puzzle::new(size);
            puzzle.generate(false, 200, &mut rng);
            assert!(!puzzle.is_solvable(), "{}x{} parity flip missed", size, size);
        }
    }

    #[test]
    fn single_step_walk_is_one_swap_from_goal() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut puzzle = Puzzle::new(3);
        puzzle.generate(true, 1, &mut rng);

        let differing = puzzle
            .grid()
            .iter()
            .zip(puzzle.goal())
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(differing, 2);
        assert!(puzzle.is_solvable());
    }

    #[test]
    fn zero_iterations_leaves_the_goal() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut puzzle = Puzzle::new(4);
        puzzle.generate(true, 0, &mut rng);
        assert!(puzzle.is_solved());
    }

    #[test]
    fn set_grid_rejects_malformed_input() {
        let mut puzzle = Puzzle::new(3);
        assert_eq!(
            puzzle.set_grid(vec![1, 2, 3]),
            Err(GridError::WrongLength {
                expected: 9,
                actual: 3
            })
        );
        assert_eq!(
            puzzle.set_grid(vec![1, 2, 3, 4, 5, 6, 7, 8, 9]),
            Err(GridError::ValueOutOfRange(9))
        );
        assert_eq!(
            puzzle.set_grid(vec![1, 2, 3, 4, 5, 6, 7, 1, 0]),
            Err(GridError::DuplicateTile(1))
        );
    }

    #[test]
    fn set_grid_accepts_any_permutation() {
        let mut puzzle = Puzzle::new(3);
        puzzle.set_grid(vec![0, 1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(puzzle.blank_pos(), 0);
    }

    #[test]
    fn neighbors_respect_grid_edges() {
        let puzzle = Puzzle::new(3);

        // blank in the center: all four moves
        let center = vec![1, 2, 3, 8, 0, 4, 7, 6, 5];
        assert_eq!(puzzle.neighbors(&center, 4).len(), 4);

        // blank in a corner: two moves
        let corner = vec![0, 2, 3, 8, 1, 4, 7, 6, 5];
        let neighbors = puzzle.neighbors(&corner, 0);
        assert_eq!(neighbors.len(), 2);
        for neighbor in &neighbors {
            assert_eq!(blank_of(&neighbor.state), neighbor.blank);
        }
    }

    #[test]
    fn neighbor_swap_is_a_single_exchange() {
        let puzzle = Puzzle::new(3);
        let state = vec![1, 2, 3, 8, 0, 4, 7, 6, 5];
        for neighbor in puzzle.neighbors(&state, 4) {
            let differing = neighbor
                .state
                .iter()
                .zip(&state)
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(differing, 2);
        }
    }

    #[test]
    fn grid_rows_view_matches_flat_layout() {
        let puzzle = Puzzle::new(3);
        let rows: Vec<&[u8]> = puzzle.goal_rows().collect();
        assert_eq!(rows, vec![&[1, 2, 3][..], &[8, 0, 4][..], &[7, 6, 5][..]]);
    }

    #[test]
    fn inversions_are_counted_against_goal_order() {
        let mut puzzle = Puzzle::new(3);
        // swapping two adjacent non-blank tiles creates exactly one inversion
        puzzle.set_grid(vec![2, 1, 3, 8, 0, 4, 7, 6, 5]).unwrap();
        assert!(!puzzle.is_solvable());
    }
}
