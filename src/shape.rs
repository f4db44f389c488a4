//! Piece footprints and the shape catalog.
//!
//! A shape is a 3x3 occupancy matrix in canonical "pinned" form: at least one
//! occupied cell in the last row and in the last column. Every usable shape
//! has a geometrically distinct counterpart assigned to the opposite input
//! button; the catalog enumerates all such shapes once per process.

use std::fmt;
use std::sync::OnceLock;

use rustc_hash::FxHashSet;

/// Side length of a shape's occupancy matrix.
pub const SHAPE_SIZE: usize = 3;

/// Occupancy bounds for enumerated catalog candidates (inclusive).
const MIN_CELLS: u32 = 2;
const MAX_CELLS: u32 = 4;

/// A piece footprint: a 3x3 boolean occupancy matrix.
///
/// Shapes are immutable values; all transforms return new shapes. Equality is
/// cell-wise.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    tiles: [[bool; SHAPE_SIZE]; SHAPE_SIZE],
}

impl Shape {
    /// Creates a shape from an occupancy matrix without normalizing it.
    pub const fn new(tiles: [[bool; SHAPE_SIZE]; SHAPE_SIZE]) -> Self {
        Self { tiles }
    }

    /// Decodes the lowest 9 bits of `bits` into a shape, row-major from the
    /// least significant bit.
    fn from_bits(bits: u16) -> Self {
        let mut tiles = [[false; SHAPE_SIZE]; SHAPE_SIZE];
        for (index, row) in tiles.iter_mut().enumerate() {
            for (offset, cell) in row.iter_mut().enumerate() {
                *cell = bits >> (index * SHAPE_SIZE + offset) & 1 != 0;
            }
        }
        Self { tiles }
    }

    /// Returns whether the cell at (row, col) is occupied.
    #[inline]
    pub fn occupied(&self, row: usize, col: usize) -> bool {
        self.tiles[row][col]
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> u32 {
        let mut count = 0;
        for row in &self.tiles {
            count += row.iter().filter(|&&cell| cell).count() as u32;
        }
        count
    }

    fn row_occupied(&self, row: usize) -> bool {
        self.tiles[row].iter().any(|&cell| cell)
    }

    fn col_occupied(&self, col: usize) -> bool {
        self.tiles.iter().any(|row| row[col])
    }

    fn is_empty(&self) -> bool {
        (0..SHAPE_SIZE).all(|row| !self.row_occupied(row))
    }

    /// Whether the shape is in canonical pinned form: the last row and last
    /// column each hold at least one occupied cell.
    pub fn is_pinned(&self) -> bool {
        self.row_occupied(SHAPE_SIZE - 1) && self.col_occupied(SHAPE_SIZE - 1)
    }

    /// Normalizes a freshly derived matrix into pinned form by shifting rows
    /// toward the last row and columns toward the last column while the far
    /// edge stays empty.
    ///
    /// The empty shape has no pinned form and is returned unchanged.
    pub fn simplified(mut self) -> Self {
        if self.is_empty() {
            return self;
        }

        while !self.row_occupied(SHAPE_SIZE - 1) {
            for row in (1..SHAPE_SIZE).rev() {
                self.tiles[row] = self.tiles[row - 1];
            }
            self.tiles[0] = [false; SHAPE_SIZE];
        }

        while !self.col_occupied(SHAPE_SIZE - 1) {
            for row in &mut self.tiles {
                for col in (1..SHAPE_SIZE).rev() {
                    row[col] = row[col - 1];
                }
                row[0] = false;
            }
        }

        self
    }

    /// Reflection across the main diagonal.
    fn mirrored_diagonal(&self) -> Self {
        let mut tiles = [[false; SHAPE_SIZE]; SHAPE_SIZE];
        for (row, line) in tiles.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                *cell = self.tiles[col][row];
            }
        }
        Self { tiles }
    }

    /// Reflection across the anti-diagonal.
    fn mirrored_antidiagonal(&self) -> Self {
        let mut tiles = [[false; SHAPE_SIZE]; SHAPE_SIZE];
        for (row, line) in tiles.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                *cell = self.tiles[SHAPE_SIZE - 1 - col][SHAPE_SIZE - 1 - row];
            }
        }
        Self { tiles }
    }

    /// Quarter-turn rotation.
    fn rotated_quarter(&self) -> Self {
        let mut tiles = [[false; SHAPE_SIZE]; SHAPE_SIZE];
        for (row, line) in tiles.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                *cell = self.tiles[SHAPE_SIZE - 1 - col][row];
            }
        }
        Self { tiles }
    }

    /// Cell-wise complement.
    fn complemented(&self) -> Self {
        let mut tiles = self.tiles;
        for row in &mut tiles {
            for cell in row {
                *cell = !*cell;
            }
        }
        Self { tiles }
    }

    /// First asymmetric transform, if any: diagonal mirror, anti-diagonal
    /// mirror, then quarter turn, each normalized and accepted only when it
    /// differs from the input.
    fn partial_counterpart(&self) -> Option<Self> {
        [
            self.mirrored_diagonal(),
            self.mirrored_antidiagonal(),
            self.rotated_quarter(),
        ]
        .into_iter()
        .map(Self::simplified)
        .find(|candidate| candidate != self)
    }

    /// The shape paired with this one on the opposite button.
    ///
    /// Falls back to the complement for perfectly symmetric shapes; the
    /// complement is accepted only if it is itself perfectly symmetric.
    /// Returns `None` for shapes with no asymmetric escape at all, which are
    /// excluded from the catalog.
    pub fn counterpart(&self) -> Option<Self> {
        if let Some(counterpart) = self.partial_counterpart() {
            return Some(counterpart);
        }

        let complement = self.complemented().simplified();
        if complement.partial_counterpart().is_some() {
            return None;
        }
        Some(complement)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, line) in self.tiles.iter().enumerate() {
            if row != 0 {
                write!(f, "/")?;
            }
            for &cell in line {
                write!(f, "{}", if cell { '#' } else { '-' })?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({self})")
    }
}

/// All usable shapes, closed under the counterpart relation.
///
/// Computed once and cached for the process lifetime; the catalog is a pure
/// function of fixed constants and is immutable after first computation.
pub fn catalog() -> &'static [Shape] {
    static CATALOG: OnceLock<Vec<Shape>> = OnceLock::new();
    CATALOG.get_or_init(build_catalog)
}

/// Enumerates all 512 occupancy patterns, keeps the usable ones, then appends
/// any counterpart not already present.
fn build_catalog() -> Vec<Shape> {
    let mut shapes = Vec::new();

    for bits in 0u16..1 << (SHAPE_SIZE * SHAPE_SIZE) {
        let shape = Shape::from_bits(bits);
        if !(MIN_CELLS..=MAX_CELLS).contains(&shape.cell_count()) {
            continue;
        }
        if !shape.is_pinned() {
            continue;
        }
        if shape.counterpart().is_none() {
            continue;
        }
        shapes.push(shape);
    }

    // close the set under the relation: complement-derived counterparts fall
    // outside the 2..=4 cell window and need appending
    let mut seen: FxHashSet<Shape> = shapes.iter().copied().collect();
    let counterparts: Vec<Shape> = shapes.iter().filter_map(Shape::counterpart).collect();
    for counterpart in counterparts {
        if seen.insert(counterpart) {
            shapes.push(counterpart);
        }
    }

    shapes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape_from_cells(cells: &[(usize, usize)]) -> Shape {
        let mut tiles = [[false; SHAPE_SIZE]; SHAPE_SIZE];
        for &(row, col) in cells {
            tiles[row][col] = true;
        }
        Shape::new(tiles)
    }

    #[test]
    fn test_simplify_pins_to_far_edge() {
        let lone = shape_from_cells(&[(0, 0)]).simplified();
        assert_eq!(lone, shape_from_cells(&[(2, 2)]));
        assert!(lone.is_pinned());
    }

    #[test]
    fn test_simplify_preserves_cell_count() {
        let shape = shape_from_cells(&[(0, 0), (0, 1), (1, 0)]).simplified();
        assert_eq!(shape.cell_count(), 3);
        assert!(shape.is_pinned());
    }

    #[test]
    fn test_simplify_of_empty_shape_terminates() {
        let empty = Shape::new([[false; SHAPE_SIZE]; SHAPE_SIZE]);
        assert_eq!(empty.simplified(), empty);
        assert!(!empty.is_pinned());
    }

    #[test]
    fn test_domino_counterpart_is_quarter_turn_class() {
        let domino = shape_from_cells(&[(2, 0), (2, 1)]);
        let counterpart = domino.counterpart().expect("domino is usable");
        assert_eq!(counterpart, shape_from_cells(&[(1, 2), (2, 2)]));
    }

    #[test]
    fn test_catalog_closed_under_counterpart() {
        for shape in catalog() {
            let counterpart = shape
                .counterpart()
                .expect("catalog members always have a counterpart");
            assert_ne!(counterpart, *shape);
        }
    }

    #[test]
    fn test_catalog_members_are_pinned_and_distinct() {
        let mut seen = FxHashSet::default();
        for shape in catalog() {
            assert!(shape.is_pinned(), "unpinned catalog member {shape}");
            assert!(seen.insert(*shape), "duplicate catalog member {shape}");
        }
    }

    #[test]
    fn test_catalog_is_idempotent() {
        let first: Vec<Shape> = catalog().to_vec();
        assert_eq!(first, catalog().to_vec());
        assert!(!first.is_empty());
    }

    #[test]
    fn test_display_rows_joined_by_slashes() {
        let domino = shape_from_cells(&[(2, 0), (2, 1)]);
        assert_eq!(domino.to_string(), "---/---/##-");
    }
}
