//! Puzzle snapshots and the accepted puzzle value.
//!
//! A [`PuzzleState`] is one immutable point in the search tree: board, order
//! grid, accumulated input string and the shape pair. Every transition clones
//! the snapshot and mutates the clone, so sibling branches never interfere.
//! The same snapshot type drives both generation (pieces fill Free cells)
//! and solving (pieces consume the cells generation filled).

use std::fmt;

use crate::error::EngineError;
use crate::grid::{CellState, Grid, CELL_COUNT, GRID_SIZE};
use crate::shape::{Shape, SHAPE_SIZE};
use crate::solver;

/// Input character for a left-shape placement.
pub const LEFT_INPUT: char = 'L';

/// Input character for a right-shape placement.
pub const RIGHT_INPUT: char = 'R';

/// Input character marking a chunk restart.
pub const CHUNK_SEPARATOR: char = ' ';

/// Bound on how many diagonals the solver may advance past an empty frontier
/// before the grid is considered defective.
pub const MAX_FRONT_ADVANCES: i32 = 2 * GRID_SIZE as i32;

/// One immutable snapshot of a puzzle under construction or under solving.
#[derive(Clone)]
pub struct PuzzleState {
    left: Shape,
    right: Shape,
    grid: Grid,
    /// 1-based input position at which each cell was placed; 0 = never.
    order: [u16; CELL_COUNT],
    inputs: String,
    solving: bool,
}

impl PuzzleState {
    /// Creates the initial generation snapshot for a shape pair.
    pub fn new(left: Shape, right: Shape) -> Self {
        Self {
            left,
            right,
            grid: Grid::new(),
            order: [0; CELL_COUNT],
            inputs: String::new(),
            solving: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn inputs(&self) -> &str {
        &self.inputs
    }

    fn shape_for(&self, is_left: bool) -> &Shape {
        if is_left {
            &self.left
        } else {
            &self.right
        }
    }

    pub fn count_must_occupy(&self) -> usize {
        self.grid.count_must_occupy()
    }

    pub fn max_diagonal(&self) -> i32 {
        self.grid.max_diagonal()
    }

    /// Whether every placed cell and obligation has been resolved.
    pub fn is_cleared(&self) -> bool {
        self.grid.is_cleared()
    }

    /// Places a shape with its top-left corner at (row, col), yielding the
    /// successor snapshot.
    ///
    /// Lingering obligations are retired first: the placement being applied
    /// is the one that was chosen to satisfy them. Each covered cell is
    /// filled (generating) or consumed (solving) and stamped with the input
    /// position, then its four orthogonal neighbors are promoted into the new
    /// obligation front. Shape cells visited later override any promotion of
    /// their own position.
    pub fn place(&self, is_left: bool, row: i32, col: i32) -> Self {
        let mut next = self.clone();
        next.inputs.push(if is_left { LEFT_INPUT } else { RIGHT_INPUT });

        let shape = *self.shape_for(is_left);
        let stamp = next.inputs.len() as u16;
        let filled = if self.solving {
            CellState::OutOfBounds
        } else {
            CellState::Occupied
        };
        let growable = if self.solving {
            CellState::Occupied
        } else {
            CellState::Free
        };

        next.grid.retire_obligations();

        for shape_row in 0..SHAPE_SIZE {
            for shape_col in 0..SHAPE_SIZE {
                if !shape.occupied(shape_row, shape_col) {
                    continue;
                }
                let cell_row = (row + shape_row as i32) as usize;
                let cell_col = (col + shape_col as i32) as usize;

                next.grid.set(cell_row, cell_col, filled);
                next.order[Grid::index(cell_row, cell_col)] = stamp;

                let neighbors = [
                    (cell_row as i32 - 1, cell_col as i32),
                    (cell_row as i32 + 1, cell_col as i32),
                    (cell_row as i32, cell_col as i32 - 1),
                    (cell_row as i32, cell_col as i32 + 1),
                ];
                for (neighbor_row, neighbor_col) in neighbors {
                    if neighbor_row < 0
                        || neighbor_col < 0
                        || neighbor_row >= GRID_SIZE as i32
                        || neighbor_col >= GRID_SIZE as i32
                    {
                        continue;
                    }
                    let state = next.grid.get(neighbor_row as usize, neighbor_col as usize);
                    if state == growable || state == CellState::MustBeOccupied {
                        next.grid.set(
                            neighbor_row as usize,
                            neighbor_col as usize,
                            CellState::MustBeOccupied,
                        );
                    }
                }
            }
        }

        next
    }

    /// Enumerates every legal next placement of one shape.
    ///
    /// A placement is legal when no covered cell is blocked and the number of
    /// covered obligations meets the minimum: one while generating, the full
    /// outstanding count while solving. A solving snapshot with no
    /// outstanding obligations instead advances the frontier to the next
    /// non-empty diagonal.
    pub fn branches(&self, is_left: bool) -> Vec<Self> {
        let mut required = 1;
        if self.solving {
            required = self.count_must_occupy();
            if required == 0 {
                return self.advance_front().into_iter().collect();
            }
        }

        let shape = self.shape_for(is_left);
        let blocking = if self.solving {
            CellState::Free
        } else {
            CellState::Occupied
        };

        let mut branches = Vec::new();
        for row in -2..GRID_SIZE as i32 - 2 {
            for col in -2..GRID_SIZE as i32 - 2 {
                let mut covered = 0;
                let mut blocked = false;

                'shape: for shape_row in 0..SHAPE_SIZE {
                    for shape_col in 0..SHAPE_SIZE {
                        if !shape.occupied(shape_row, shape_col) {
                            continue;
                        }
                        let cell_row = row + shape_row as i32;
                        let cell_col = col + shape_col as i32;
                        if cell_row < 0 || cell_col < 0 {
                            blocked = true;
                            break 'shape;
                        }

                        // the offset range keeps the far edge in bounds
                        let state = self.grid.get(cell_row as usize, cell_col as usize);
                        if state == CellState::OutOfBounds || state == blocking {
                            blocked = true;
                            break 'shape;
                        }
                        if state == CellState::MustBeOccupied {
                            covered += 1;
                        }
                    }
                }

                if blocked || covered < required {
                    continue;
                }
                branches.push(self.place(is_left, row, col));
            }
        }

        branches
    }

    /// Clones the snapshot, appends a chunk separator and reseeds the
    /// obligation front at `target_y`.
    pub fn restart_chunk(&self, target_y: i32) -> Self {
        let mut next = self.clone();
        next.inputs.push(CHUNK_SEPARATOR);
        next.grid.start_chunk(target_y, self.solving);
        next
    }

    /// Advances the frontier one diagonal at a time until some cell becomes
    /// obligated, or `None` once the sanity bound is exceeded.
    pub fn advance_front(&self) -> Option<Self> {
        for target_y in 0..=MAX_FRONT_ADVANCES {
            let branch = self.restart_chunk(target_y);
            if branch.count_must_occupy() > 0 {
                return Some(branch);
            }
        }
        None
    }

    /// Demotes residual obligations to Free, leaving a clean target for the
    /// solver.
    pub fn release_obligations(&mut self) {
        self.grid.release_obligations();
    }

    /// A fresh solving-mode view of this snapshot: same board and shapes,
    /// empty input string and order grid.
    pub fn solving_view(&self) -> Self {
        Self {
            left: self.left,
            right: self.right,
            grid: self.grid.clone(),
            order: [0; CELL_COUNT],
            inputs: String::new(),
            solving: true,
        }
    }

    pub(crate) fn into_inputs(self) -> String {
        self.inputs
    }
}

/// A finished, validated puzzle: the only snapshot that outlives the search.
#[derive(Clone, PartialEq, Eq)]
pub struct Puzzle {
    left: Shape,
    right: Shape,
    grid: Grid,
    order: [u16; CELL_COUNT],
    solution: String,
}

impl Puzzle {
    pub(crate) fn from_state(state: PuzzleState) -> Self {
        Self {
            left: state.left,
            right: state.right,
            grid: state.grid,
            order: state.order,
            solution: state.inputs,
        }
    }

    /// The footprint placed by a left input.
    pub fn left_component(&self) -> Shape {
        self.left
    }

    /// The footprint placed by a right input.
    pub fn right_component(&self) -> Shape {
        self.right
    }

    /// The unique input sequence that clears the grid: `L`/`R` per placement,
    /// with spaces marking chunk restarts.
    pub fn solution(&self) -> &str {
        &self.solution
    }

    /// The solution with chunk separators removed, as matched against live
    /// input.
    pub fn stripped_solution(&self) -> String {
        self.solution
            .chars()
            .filter(|&c| c != CHUNK_SEPARATOR)
            .collect()
    }

    /// Board positions grouped by the input position that placed them, for
    /// staged reveal and resolve effects. Separator positions yield empty
    /// groups.
    pub fn cell_groups(&self) -> Vec<Vec<(usize, usize)>> {
        let mut groups = vec![Vec::new(); self.solution.len()];
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let stamp = self.order[Grid::index(row, col)];
                if stamp > 0 {
                    groups[stamp as usize - 1].push((row, col));
                }
            }
        }
        groups
    }

    /// Re-runs the exhaustive solver over the finished grid.
    ///
    /// Every accepted puzzle yields a single distinct sequence here; the
    /// method exists for verification and diagnostics.
    pub fn enumerate_solutions(&self) -> Result<Vec<String>, EngineError> {
        let state = PuzzleState {
            left: self.left,
            right: self.right,
            grid: self.grid.clone(),
            order: [0; CELL_COUNT],
            inputs: String::new(),
            solving: true,
        };
        solver::solve(state)
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::LOWEST_DIAGONAL;
    use crate::shape::Shape;

    fn domino_pair() -> (Shape, Shape) {
        let mut tiles = [[false; SHAPE_SIZE]; SHAPE_SIZE];
        tiles[2][0] = true;
        tiles[2][1] = true;
        let left = Shape::new(tiles);
        (left, left.counterpart().expect("domino has a counterpart"))
    }

    #[test]
    fn test_place_stamps_and_promotes_frontier() {
        let (left, right) = domino_pair();
        let state = PuzzleState::new(left, right);

        // horizontal domino covering (2,5) and (2,6): anchored at (0,5)
        let placed = state.place(true, 0, 5);
        assert_eq!(placed.inputs(), "L");
        assert_eq!(placed.grid().get(2, 5), CellState::Occupied);
        assert_eq!(placed.grid().get(2, 6), CellState::Occupied);
        assert_eq!(placed.order[Grid::index(2, 5)], 1);
        assert_eq!(placed.order[Grid::index(2, 6)], 1);

        // free neighbors promoted; the old front is retired
        assert_eq!(placed.grid().get(3, 5), CellState::MustBeOccupied);
        assert_eq!(placed.grid().get(2, 7), CellState::MustBeOccupied);
        assert_eq!(placed.grid().get(0, 7), CellState::OutOfBounds);
    }

    #[test]
    fn test_generation_branches_cover_the_front() {
        let (left, right) = domino_pair();
        let state = PuzzleState::new(left, right);

        for branch in state.branches(true) {
            // each first placement must cover the seeded diagonal
            let covered = (0..GRID_SIZE).flat_map(|r| (0..GRID_SIZE).map(move |c| (r, c))).any(
                |(r, c)| {
                    branch.grid().get(r, c) == CellState::Occupied
                        && (r + c) as i32 == LOWEST_DIAGONAL
                },
            );
            assert!(covered);
            assert_eq!(branch.inputs(), "L");
        }
        assert!(!state.branches(true).is_empty());
    }

    #[test]
    fn test_restart_chunk_appends_separator() {
        let (left, right) = domino_pair();
        let state = PuzzleState::new(left, right).place(true, 0, 5);
        let restarted = state.restart_chunk(9);
        assert_eq!(restarted.inputs(), "L ");
        // prior obligations retire rather than joining the new front
        assert_eq!(restarted.grid().get(3, 6), CellState::OutOfBounds);
        assert_eq!(restarted.count_must_occupy(), 6);
    }

    #[test]
    fn test_solving_view_starts_clean() {
        let (left, right) = domino_pair();
        let mut state = PuzzleState::new(left, right).place(true, 0, 5);
        state.release_obligations();
        let view = state.solving_view();
        assert_eq!(view.inputs(), "");
        assert!(view.solving);
        assert_eq!(view.grid().get(2, 5), CellState::Occupied);
    }
}
