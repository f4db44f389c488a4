//! Board representation for the staircase puzzle.
//!
//! The board is a square grid restricted to a diagonal diamond: cell (i, j)
//! carries a diagonal coordinate `y = i + j` and an offset coordinate
//! `x = j - i`, and only cells with `|x| <= MAX_HORIZONTAL_DISTANCE` inside a
//! band of diagonals are playable. Pieces are placed in non-decreasing
//! diagonal order, so state transitions only ever retire cells or promote
//! them into the obligation frontier.

/// Farthest playable offset from the main diagonal.
pub const MAX_HORIZONTAL_DISTANCE: i32 = 7;

/// Half-width of the playable diagonal band.
pub const MAX_VERTICAL_DISTANCE: i32 = 12;

/// Side length of the board.
pub const GRID_SIZE: usize = (MAX_HORIZONTAL_DISTANCE + MAX_VERTICAL_DISTANCE + 1) as usize;

/// Total number of cells in the board.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Lowest playable diagonal, seeded as the initial obligation front.
pub const LOWEST_DIAGONAL: i32 = GRID_SIZE as i32 - 1 - MAX_VERTICAL_DISTANCE;

/// Highest playable diagonal.
pub const HIGHEST_DIAGONAL: i32 = GRID_SIZE as i32 - 1 + MAX_VERTICAL_DISTANCE;

/// State of one board cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CellState {
    /// Outside the playable diamond, or already retired.
    OutOfBounds,
    /// Covered by a placed piece (generation mode only).
    Occupied,
    /// Adjacent to the last placement; the next placement must cover it.
    MustBeOccupied,
    /// Playable and unconstrained.
    Free,
}

/// A fixed-size board of cell states.
///
/// Cloning is a bulk copy; search branches clone before mutating and never
/// touch their parent.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [CellState; CELL_COUNT],
}

impl Grid {
    /// Flat index of cell (row, col).
    #[inline]
    pub const fn index(row: usize, col: usize) -> usize {
        row * GRID_SIZE + col
    }

    /// Builds the initial board: the playable diamond is Free, everything
    /// outside it OutOfBounds, and the lowest diagonal pre-seeded as
    /// MustBeOccupied so generation starts by covering it.
    pub fn new() -> Self {
        let mut cells = [CellState::OutOfBounds; CELL_COUNT];

        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let x = col as i32 - row as i32;
                let y = (row + col) as i32;

                if !(LOWEST_DIAGONAL..=HIGHEST_DIAGONAL).contains(&y) {
                    continue;
                }
                if x.abs() > MAX_HORIZONTAL_DISTANCE {
                    continue;
                }

                cells[Self::index(row, col)] = if y == LOWEST_DIAGONAL {
                    CellState::MustBeOccupied
                } else {
                    CellState::Free
                };
            }
        }

        Self { cells }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> CellState {
        self.cells[Self::index(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, state: CellState) {
        self.cells[Self::index(row, col)] = state;
    }

    /// Number of cells the next placement is obligated to cover.
    pub fn count_must_occupy(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&state| state == CellState::MustBeOccupied)
            .count()
    }

    /// Highest diagonal among Occupied cells, or 0 when nothing is placed.
    pub fn max_diagonal(&self) -> i32 {
        let mut max_y = 0;
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let y = (row + col) as i32;
                if self.get(row, col) == CellState::Occupied && y > max_y {
                    max_y = y;
                }
            }
        }
        max_y
    }

    /// Retires every lingering obligation to OutOfBounds. Applied before a
    /// placement lands: the obligations were satisfied or invalidated by the
    /// branch being taken.
    pub fn retire_obligations(&mut self) {
        for cell in &mut self.cells {
            if *cell == CellState::MustBeOccupied {
                *cell = CellState::OutOfBounds;
            }
        }
    }

    /// Demotes every lingering obligation to Free.
    pub fn release_obligations(&mut self) {
        for cell in &mut self.cells {
            if *cell == CellState::MustBeOccupied {
                *cell = CellState::Free;
            }
        }
    }

    /// Seeds a fresh obligation front at `target_y`: lingering obligations
    /// and cells on diagonals below it are retired, cells exactly on it
    /// become MustBeOccupied, and cells above keep their state. Placed cells
    /// (Occupied when generating, Free when solving) are left untouched.
    pub fn start_chunk(&mut self, target_y: i32, solving: bool) {
        let keep = if solving {
            CellState::Free
        } else {
            CellState::Occupied
        };

        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let state = self.get(row, col);
                if state == CellState::OutOfBounds || state == keep {
                    continue;
                }
                if state == CellState::MustBeOccupied {
                    self.set(row, col, CellState::OutOfBounds);
                    continue;
                }

                let y = (row + col) as i32;
                if y < target_y {
                    self.set(row, col, CellState::OutOfBounds);
                } else if y == target_y {
                    self.set(row, col, CellState::MustBeOccupied);
                }
            }
        }
    }

    /// Whether no cell remains Occupied or MustBeOccupied.
    pub fn is_cleared(&self) -> bool {
        !self
            .cells
            .iter()
            .any(|&state| state == CellState::Occupied || state == CellState::MustBeOccupied)
    }

    /// Renders the board one row per line: `.` out of bounds, `#` occupied,
    /// `!` obligated, `-` free.
    pub fn render(&self) -> String {
        let mut output = String::with_capacity(CELL_COUNT + GRID_SIZE);
        for row in 0..GRID_SIZE {
            if row != 0 {
                output.push('\n');
            }
            for col in 0..GRID_SIZE {
                output.push(match self.get(row, col) {
                    CellState::OutOfBounds => '.',
                    CellState::Occupied => '#',
                    CellState::MustBeOccupied => '!',
                    CellState::Free => '-',
                });
            }
        }
        output
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout_snapshot() {
        insta::assert_snapshot!(Grid::new().render(), @r"
.......!............
......!--...........
.....!----..........
....!------.........
...!--------........
..!----------.......
.!------------......
!--------------.....
.---------------....
..---------------...
...---------------..
....---------------.
.....---------------
......-------------.
.......-----------..
........---------...
.........-------....
..........-----.....
...........---......
............-.......
");
    }

    #[test]
    fn test_initial_front_spans_lowest_diagonal() {
        let grid = Grid::new();
        assert_eq!(grid.count_must_occupy(), 8);
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                if grid.get(row, col) == CellState::MustBeOccupied {
                    assert_eq!((row + col) as i32, LOWEST_DIAGONAL);
                }
            }
        }
    }

    #[test]
    fn test_max_diagonal_tracks_occupied_cells() {
        let mut grid = Grid::new();
        assert_eq!(grid.max_diagonal(), 0);
        grid.set(4, 5, CellState::Occupied);
        grid.set(7, 7, CellState::Occupied);
        assert_eq!(grid.max_diagonal(), 14);
    }

    #[test]
    fn test_start_chunk_reseeds_front() {
        let mut grid = Grid::new();
        grid.start_chunk(10, false);

        // old front retired, new front on diagonal 10, cells above untouched
        assert_eq!(grid.get(0, 7), CellState::OutOfBounds);
        assert_eq!(grid.get(4, 6), CellState::MustBeOccupied);
        assert_eq!(grid.get(4, 4), CellState::OutOfBounds);
        assert_eq!(grid.get(5, 6), CellState::Free);
        assert_eq!(grid.count_must_occupy(), 7);
    }

    #[test]
    fn test_release_obligations_frees_front() {
        let mut grid = Grid::new();
        grid.release_obligations();
        assert_eq!(grid.count_must_occupy(), 0);
        assert_eq!(grid.get(0, 7), CellState::Free);
    }
}
