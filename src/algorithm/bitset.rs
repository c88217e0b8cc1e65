use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over the cells of a rectangular image
///
/// Cells are addressed by `(row, col)` and stored row-major. Used to collect
/// every image cell covered by at least one pattern match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellBitset {
    bits: BitVec,
    rows: usize,
    cols: usize,
}

impl CellBitset {
    /// Create a bitset with no cells present
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            bits: bitvec![0; rows * cols],
            rows,
            cols,
        }
    }

    /// Mark a cell as present
    ///
    /// Cells outside the image are ignored.
    pub fn insert(&mut self, row: usize, col: usize) {
        if row < self.rows && col < self.cols {
            self.bits.set(row * self.cols + col, true);
        }
    }

    /// Test cell membership
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows
            && col < self.cols
            && self.bits.get(row * self.cols + col).as_deref() == Some(&true)
    }

    /// Test if no cells are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count cells in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Image dimensions as (rows, cols)
    pub const fn dim(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}

impl fmt::Display for CellBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CellBitset({} of {}x{} cells)",
            self.count(),
            self.rows,
            self.cols
        )
    }
}
