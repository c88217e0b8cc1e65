//! Reference patterns and the multi-orientation pattern scan
//!
//! A reference pattern is a set of cell offsets inside a bounding box. The
//! scan slides it over every orientation of an assembled image, collects the
//! cells covered by any match, and reports how many active cells remain
//! uncovered ("roughness").

use crate::algorithm::bitset::CellBitset;
use crate::io::configuration::{ACTIVE_SYMBOL, DEFAULT_PATTERN_ROWS};
use crate::io::error::{PuzzleError, Result, invalid_parameter};
use crate::spatial::grid::AssembledImage;
use crate::spatial::orientation::Orientation;
use crate::spatial::tiles::Pixel;
use ndarray::ArrayView2;
use std::str::FromStr;

/// Fixed-shape pattern of cells that must all be active to match
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferencePattern {
    width: usize,
    height: usize,
    offsets: Vec<[usize; 2]>,
}

impl ReferencePattern {
    /// Create a pattern from `[dx, dy]` offsets
    ///
    /// The bounding box is the smallest one containing every offset.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if no offset is given
    pub fn new(mut offsets: Vec<[usize; 2]>) -> Result<Self> {
        if offsets.is_empty() {
            return Err(invalid_parameter(
                "pattern",
                &"[]",
                &"a pattern needs at least one active cell",
            ));
        }
        offsets.sort_unstable_by_key(|&[dx, dy]| (dy, dx));
        offsets.dedup();

        let width = offsets.iter().map(|&[dx, _]| dx + 1).max().unwrap_or(0);
        let height = offsets.iter().map(|&[_, dy]| dy + 1).max().unwrap_or(0);
        Ok(Self {
            width,
            height,
            offsets,
        })
    }

    /// Build a pattern from text rows where `#` marks an active cell
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if no row contains `#`
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let offsets = rows
            .iter()
            .enumerate()
            .flat_map(|(dy, row)| {
                row.chars()
                    .enumerate()
                    .filter(|&(_, symbol)| symbol == ACTIVE_SYMBOL)
                    .map(move |(dx, _)| [dx, dy])
            })
            .collect();
        Self::new(offsets)
    }

    /// The default three-row "sea monster" pattern
    ///
    /// # Errors
    ///
    /// Never fails for the built-in rows; the signature mirrors [`Self::from_rows`]
    pub fn sea_monster() -> Result<Self> {
        Self::from_rows(&DEFAULT_PATTERN_ROWS)
    }

    /// Bounding box width
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Bounding box height
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Active cell offsets as `[dx, dy]`, sorted row by row
    pub fn offsets(&self) -> &[[usize; 2]] {
        &self.offsets
    }

    /// Number of cells a single match covers
    pub fn active_cells(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the pattern matches with its top-left corner at `(x, y)`
    pub fn matches_at(&self, grid: &ArrayView2<'_, Pixel>, x: usize, y: usize) -> bool {
        self.offsets.iter().all(|&[dx, dy]| {
            grid.get((y + dy, x + dx))
                .is_some_and(|pixel| pixel.is_active())
        })
    }

    /// Every top-left `[x, y]` where the pattern matches, row by row
    pub fn find_matches(&self, grid: &ArrayView2<'_, Pixel>) -> Vec<[usize; 2]> {
        let (rows, cols) = grid.dim();
        if self.width > cols || self.height > rows {
            return Vec::new();
        }

        let mut placements = Vec::new();
        for y in 0..=rows - self.height {
            for x in 0..=cols - self.width {
                if self.matches_at(grid, x, y) {
                    placements.push([x, y]);
                }
            }
        }
        placements
    }

    /// Cells covered by the given placements
    pub fn coverage(&self, dim: (usize, usize), placements: &[[usize; 2]]) -> CellBitset {
        let mut covered = CellBitset::new(dim.0, dim.1);
        for &[x, y] in placements {
            for &[dx, dy] in &self.offsets {
                covered.insert(y + dy, x + dx);
            }
        }
        covered
    }
}

impl FromStr for ReferencePattern {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<&str> = s.lines().collect();
        Self::from_rows(&rows)
    }
}

/// Outcome of scanning an assembled image for a pattern
#[derive(Clone, Debug)]
pub struct ScanReport {
    /// First orientation of the image in which the pattern was found
    pub orientation: Orientation,
    /// Top-left `[x, y]` of every match in that orientation
    pub placements: Vec<[usize; 2]>,
    /// Cells covered by at least one match
    pub covered: CellBitset,
    /// Active cells in the image
    pub active_cells: usize,
}

impl ScanReport {
    /// Number of cells covered by at least one match
    pub fn covered_cells(&self) -> usize {
        self.covered.count()
    }

    /// Active cells not covered by any match
    pub fn roughness(&self) -> usize {
        self.active_cells.saturating_sub(self.covered_cells())
    }
}

/// Scan every orientation of `image` and stop at the first containing `pattern`
///
/// # Errors
///
/// Returns `NoPatternFound` if none of the 8 orientations contains a match
pub fn scan(image: &AssembledImage, pattern: &ReferencePattern) -> Result<ScanReport> {
    let mut orientations_tried = 0;

    for (orientation, grid) in image.orientations() {
        orientations_tried += 1;
        let placements = pattern.find_matches(&grid.view());
        log::debug!("{orientation}: {} pattern matches", placements.len());

        if !placements.is_empty() {
            let covered = pattern.coverage(grid.dim(), &placements);
            return Ok(ScanReport {
                orientation,
                placements,
                covered,
                active_cells: image.active_count(),
            });
        }
    }

    Err(PuzzleError::NoPatternFound {
        image_side: image.side(),
        orientations_tried,
    })
}
