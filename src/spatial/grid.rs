//! Placement grid and the stitched image it produces
//!
//! The placement grid is a flat arena of `side * side` cells addressed by
//! `(col, row)`. Each cell holds the fully oriented tile placed there, border
//! ring included, so shared edges can still be verified. Borders are stripped
//! exactly once, when the grid is stitched into an [`AssembledImage`].

use crate::io::error::{Result, malformed};
use crate::spatial::orientation::{Orientation, Orientations, orientations};
use crate::spatial::tiles::{Edge, Pixel, Tile, TileId, write_grid};
use ndarray::{Array2, ArrayView2, s};
use std::fmt;

/// A tile fixed at a grid position in its final orientation
#[derive(Clone, Debug)]
pub struct PlacedTile {
    /// Orientation applied to the tile as it was read
    pub orientation: Orientation,
    /// The re-oriented tile, border ring included
    pub tile: Tile,
}

impl PlacedTile {
    /// Identifier of the placed tile
    pub const fn id(&self) -> TileId {
        self.tile.id()
    }
}

/// Fixed-size arena of tile placements indexed by `(col, row)`
#[derive(Clone, Debug)]
pub struct PlacementGrid {
    side: usize,
    cells: Vec<Option<PlacedTile>>,
}

impl PlacementGrid {
    /// Create an empty grid of `side * side` cells
    pub fn new(side: usize) -> Self {
        Self {
            side,
            cells: vec![None; side * side],
        }
    }

    /// Number of tiles along each axis
    pub const fn side(&self) -> usize {
        self.side
    }

    const fn index(&self, col: usize, row: usize) -> Option<usize> {
        if col < self.side && row < self.side {
            Some(row * self.side + col)
        } else {
            None
        }
    }

    /// The placement at `(col, row)`, if any
    pub fn get(&self, col: usize, row: usize) -> Option<&PlacedTile> {
        self.index(col, row)
            .and_then(|index| self.cells.get(index))
            .and_then(Option::as_ref)
    }

    /// Whether `(col, row)` already holds a tile
    pub fn is_placed(&self, col: usize, row: usize) -> bool {
        self.get(col, row).is_some()
    }

    /// Store a placement
    ///
    /// # Errors
    ///
    /// Returns `MalformedPuzzle` if the position is outside the grid or
    /// already occupied
    pub fn insert(&mut self, col: usize, row: usize, placed: PlacedTile) -> Result<()> {
        let cell = self
            .index(col, row)
            .and_then(|index| self.cells.get_mut(index))
            .ok_or_else(|| malformed(&format!("position ({col}, {row}) is outside the grid")))?;
        if let Some(existing) = cell {
            return Err(malformed(&format!(
                "position ({col}, {row}) already holds tile {}",
                existing.id()
            )));
        }
        *cell = Some(placed);
        Ok(())
    }

    /// Number of placed tiles
    pub fn placed_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// Whether every cell holds a tile
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Placed tile ids as `[row][col]`, with `None` for empty cells
    pub fn layout(&self) -> Array2<Option<TileId>> {
        Array2::from_shape_fn((self.side, self.side), |(row, col)| {
            self.get(col, row).map(PlacedTile::id)
        })
    }

    /// Check that every pair of adjacent placed tiles shares an identical edge
    ///
    /// # Errors
    ///
    /// Returns `MalformedPuzzle` naming the first mismatching pair
    pub fn verify_seams(&self) -> Result<()> {
        for row in 0..self.side {
            for col in 0..self.side {
                let Some(placed) = self.get(col, row) else {
                    continue;
                };
                if let Some(right) = self.get(col + 1, row) {
                    check_seam(placed, Edge::Right, right, Edge::Left)?;
                }
                if let Some(below) = self.get(col, row + 1) {
                    check_seam(placed, Edge::Bottom, below, Edge::Top)?;
                }
            }
        }
        Ok(())
    }

    /// Strip every tile's border ring and concatenate the interiors row-major
    ///
    /// # Errors
    ///
    /// Returns `MalformedPuzzle` if a cell is empty or the tiles differ in size
    pub fn stitch(self) -> Result<AssembledImage> {
        let side = self.side;
        let first_side = self
            .get(0, 0)
            .map(|placed| placed.tile.side())
            .ok_or_else(|| malformed(&"cannot stitch an empty grid"))?;
        let block = first_side.saturating_sub(2);
        let mut pixels = Array2::from_elem((side * block, side * block), Pixel::INACTIVE);

        for (index, cell) in self.cells.into_iter().enumerate() {
            let (row, col) = (index / side, index % side);
            let placed =
                cell.ok_or_else(|| malformed(&format!("position ({col}, {row}) is empty")))?;
            if placed.tile.side() != first_side {
                return Err(malformed(&format!(
                    "tile {} has side {}, expected {first_side}",
                    placed.id(),
                    placed.tile.side()
                )));
            }
            let interior = placed.tile.interior();
            pixels
                .slice_mut(s![
                    row * block..(row + 1) * block,
                    col * block..(col + 1) * block
                ])
                .assign(&interior);
        }

        Ok(AssembledImage { pixels })
    }
}

fn check_seam(
    first: &PlacedTile,
    first_edge: Edge,
    second: &PlacedTile,
    second_edge: Edge,
) -> Result<()> {
    let shared = first.tile.border(first_edge);
    if shared == second.tile.border(second_edge) {
        Ok(())
    } else {
        Err(malformed(&format!(
            "tiles {} and {} disagree along their shared edge",
            first.id(),
            second.id()
        )))
    }
}

/// The stitched, border-free image of a solved puzzle
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssembledImage {
    pixels: Array2<Pixel>,
}

impl AssembledImage {
    /// Wrap a pixel buffer
    pub const fn new(pixels: Array2<Pixel>) -> Self {
        Self { pixels }
    }

    /// Build an image from rows of symbols
    ///
    /// # Errors
    ///
    /// Returns `MalformedPuzzle` if the rows are ragged
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        if rows.iter().any(|row| row.chars().count() != width) {
            return Err(malformed(&"image rows must all have the same length"));
        }
        let symbols = rows
            .iter()
            .flat_map(|row| row.chars().map(Pixel::from))
            .collect();
        Array2::from_shape_vec((height, width), symbols)
            .map(Self::new)
            .map_err(|e| malformed(&e))
    }

    /// Image side length in pixels
    pub fn side(&self) -> usize {
        self.pixels.nrows()
    }

    /// The pixel buffer
    pub const fn pixels(&self) -> &Array2<Pixel> {
        &self.pixels
    }

    /// Read-only view of the pixel buffer
    pub fn view(&self) -> ArrayView2<'_, Pixel> {
        self.pixels.view()
    }

    /// Number of active pixels
    pub fn active_count(&self) -> usize {
        self.pixels.iter().filter(|pixel| pixel.is_active()).count()
    }

    /// Copy of the image in the given orientation
    #[must_use]
    pub fn oriented(&self, orientation: Orientation) -> Self {
        Self::new(orientation.apply(&self.pixels.view()))
    }

    /// Lazily iterate over the 8 orientations of the image
    pub fn orientations(&self) -> Orientations<'_, Pixel> {
        orientations(self.pixels.view())
    }
}

impl fmt::Display for AssembledImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, &self.pixels.view())
    }
}
