//! End-to-end puzzle solving: corners, assembly, stitching and scanning

use crate::algorithm::assembly::{Assembler, puzzle_side};
use crate::algorithm::borders::{BorderIndex, corner_id_product};
use crate::analysis::patterns::{ReferencePattern, ScanReport, scan};
use crate::io::error::{Result, malformed};
use crate::io::progress::Stage;
use crate::spatial::grid::{AssembledImage, PlacementGrid};
use crate::spatial::tiles::{Tile, TileId};

/// Result of solving one puzzle
#[derive(Clone, Debug)]
pub struct Solution {
    /// Product of the four corner tile ids
    pub corner_product: TileId,
    /// Active pixels not covered by any pattern match
    pub roughness: usize,
    /// The stitched image in its canonical orientation
    pub image: AssembledImage,
    /// Details of the successful pattern scan
    pub scan: ScanReport,
}

/// Owns a validated tile set and its border index
#[derive(Debug)]
pub struct PuzzleSolver {
    tiles: Vec<Tile>,
    index: BorderIndex,
    side: usize,
}

impl PuzzleSolver {
    /// Validate the tile count and index the tile borders
    ///
    /// # Errors
    ///
    /// Returns `MalformedPuzzle` if the tile count is not a perfect square,
    /// which is checked before any other work, or if the border index
    /// cannot be built
    pub fn new(tiles: Vec<Tile>) -> Result<Self> {
        let side = puzzle_side(tiles.len())?;
        let index = BorderIndex::build(&tiles)?;
        log::info!(
            "solving {side}x{side} puzzle of {} tiles",
            tiles.len()
        );
        Ok(Self { tiles, index, side })
    }

    /// Number of tiles along each side
    pub const fn side(&self) -> usize {
        self.side
    }

    /// The tiles as read
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The border index built from the tiles
    pub const fn index(&self) -> &BorderIndex {
        &self.index
    }

    /// The four corner tile ids in input order
    ///
    /// # Errors
    ///
    /// Returns `MalformedPuzzle` unless exactly four corners exist
    pub fn corners(&self) -> Result<Vec<TileId>> {
        self.index.find_corner_tiles(&self.tiles)
    }

    /// Product of the four corner tile ids
    ///
    /// # Errors
    ///
    /// Returns `MalformedPuzzle` if the corners cannot be identified, or a
    /// computation error on overflow
    pub fn corner_product(&self) -> Result<TileId> {
        self.index.corner_product(&self.tiles)
    }

    /// Place every tile, anchored at the first corner
    ///
    /// # Errors
    ///
    /// Returns `MalformedPuzzle` if the tiles cannot be assembled
    pub fn place(&self) -> Result<PlacementGrid> {
        self.place_from(&self.corners()?)
    }

    fn place_from(&self, corners: &[TileId]) -> Result<PlacementGrid> {
        let corner = corners
            .first()
            .copied()
            .ok_or_else(|| malformed(&"no corner tile to start from"))?;
        let grid = Assembler::new(&self.tiles, &self.index)?.assemble(corner)?;
        grid.verify_seams()?;
        Ok(grid)
    }

    /// Place every tile and stitch the interiors into one image
    ///
    /// # Errors
    ///
    /// Returns `MalformedPuzzle` if the tiles cannot be assembled
    pub fn assemble(&self) -> Result<AssembledImage> {
        Self::stitch(self.place()?)
    }

    fn stitch(grid: PlacementGrid) -> Result<AssembledImage> {
        let image = grid.stitch()?;
        log::debug!("assembled {0}x{0} image", image.side());
        Ok(image)
    }

    /// Run the whole pipeline against `pattern`
    ///
    /// # Errors
    ///
    /// Returns `MalformedPuzzle` for invalid tile sets and `NoPatternFound`
    /// if the pattern appears in no orientation of the assembled image
    pub fn solve(&self, pattern: &ReferencePattern) -> Result<Solution> {
        self.solve_with_progress(pattern, |_| {})
    }

    /// Run the whole pipeline, reporting each stage as it starts
    ///
    /// Corners are located once and shared by the product and the
    /// placement. `on_stage` sees `Assemble` and then `Scan`.
    ///
    /// # Errors
    ///
    /// See [`PuzzleSolver::solve`]
    pub fn solve_with_progress<F>(
        &self,
        pattern: &ReferencePattern,
        mut on_stage: F,
    ) -> Result<Solution>
    where
        F: FnMut(Stage),
    {
        let corners = self.corners()?;
        let corner_product = corner_id_product(&corners)?;

        on_stage(Stage::Assemble);
        let image = Self::stitch(self.place_from(&corners)?)?;

        on_stage(Stage::Scan);
        let scan = scan(&image, pattern)?;
        log::info!(
            "found {} pattern matches with {}",
            scan.placements.len(),
            scan.orientation
        );

        Ok(Solution {
            corner_product,
            roughness: scan.roughness(),
            image,
            scan,
        })
    }
}

/// Solve a tile set in one call
///
/// # Errors
///
/// See [`PuzzleSolver::new`] and [`PuzzleSolver::solve`]
pub fn solve(tiles: Vec<Tile>, pattern: &ReferencePattern) -> Result<Solution> {
    PuzzleSolver::new(tiles)?.solve(pattern)
}
