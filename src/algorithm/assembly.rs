//! Backtracking-free placement of tiles into a square grid
//!
//! Assembly starts from a corner tile turned so that its two outer edges face
//! up and left, then walks right and down from every placed tile. Each step
//! looks up the unique neighbour across the shared border and orients it to
//! match. A well-formed puzzle admits exactly one choice at every step, so
//! any ambiguity or mismatch aborts instead of being retried.

use crate::algorithm::borders::BorderIndex;
use crate::io::error::{Result, malformed};
use crate::spatial::grid::{PlacedTile, PlacementGrid};
use crate::spatial::orientation::Orientation;
use crate::spatial::tiles::{Border, Edge, Tile, TileId};
use std::collections::{HashMap, HashSet};

/// Number of tiles along each side of a square puzzle
///
/// # Errors
///
/// Returns `MalformedPuzzle` unless `tile_count` is a perfect square of a
/// side of at least 2
pub fn puzzle_side(tile_count: usize) -> Result<usize> {
    let side = tile_count.isqrt();
    if side * side != tile_count {
        return Err(malformed(&format!(
            "{tile_count} tiles cannot form a square grid"
        )));
    }
    if side < 2 {
        return Err(malformed(&format!(
            "{tile_count} tiles are too few to have four corners"
        )));
    }
    Ok(side)
}

/// Places tiles into a [`PlacementGrid`] by following border matches
pub struct Assembler<'a> {
    tiles: HashMap<TileId, &'a Tile>,
    index: &'a BorderIndex,
    grid: PlacementGrid,
    used: HashSet<TileId>,
}

impl<'a> Assembler<'a> {
    /// Prepare an assembler for `tiles`
    ///
    /// # Errors
    ///
    /// Returns `MalformedPuzzle` if the tile count is not a perfect square or
    /// the tiles differ in side length
    pub fn new(tiles: &'a [Tile], index: &'a BorderIndex) -> Result<Self> {
        let side = puzzle_side(tiles.len())?;

        let tile_side = tiles.first().map_or(0, Tile::side);
        if let Some(odd) = tiles.iter().find(|tile| tile.side() != tile_side) {
            return Err(malformed(&format!(
                "tile {} has side {}, expected {tile_side}",
                odd.id(),
                odd.side()
            )));
        }

        Ok(Self {
            tiles: tiles.iter().map(|tile| (tile.id(), tile)).collect(),
            index,
            grid: PlacementGrid::new(side),
            used: HashSet::with_capacity(tiles.len()),
        })
    }

    /// Turn a corner tile so that its unmatched edges face up and left
    ///
    /// # Errors
    ///
    /// Returns `MalformedPuzzle` if `corner` is not one of the tiles
    pub fn canonical_corner(&self, corner: TileId) -> Result<(Orientation, Tile)> {
        let tile = self.tile(corner)?;
        let mut orientation = Orientation::IDENTITY;

        if self.index.is_outer(&tile.border(Edge::Right)) {
            orientation = orientation.compose(Orientation::FLIP_H);
        }
        if self
            .index
            .is_outer(&tile.oriented(orientation).border(Edge::Bottom))
        {
            orientation = orientation.compose(Orientation::FLIP_V);
        }

        log::debug!("anchoring corner {corner} at (0, 0) with {orientation}");
        Ok((orientation, tile.oriented(orientation)))
    }

    /// Place every tile, starting from `corner` at the top-left
    ///
    /// # Errors
    ///
    /// Returns `MalformedPuzzle` if any neighbour is missing, ambiguous,
    /// placed twice, or disagrees with an already placed tile, or if the grid
    /// is left incomplete
    pub fn assemble(mut self, corner: TileId) -> Result<PlacementGrid> {
        let (orientation, tile) = self.canonical_corner(corner)?;
        self.place(0, 0, PlacedTile { orientation, tile })?;

        if !self.grid.is_complete() {
            return Err(malformed(&format!(
                "only {} of {} tiles could be placed",
                self.grid.placed_count(),
                self.tiles.len()
            )));
        }
        Ok(self.grid)
    }

    fn place(&mut self, col: usize, row: usize, placed: PlacedTile) -> Result<()> {
        if !self.used.insert(placed.id()) {
            return Err(malformed(&format!(
                "tile {} would be placed twice",
                placed.id()
            )));
        }
        self.verify_placed_neighbours(col, row, &placed)?;

        log::trace!(
            "placed tile {} at ({col}, {row}) with {}",
            placed.id(),
            placed.orientation
        );

        let right_border = placed.tile.border(Edge::Right);
        let bottom_border = placed.tile.border(Edge::Bottom);
        let id = placed.id();
        self.grid.insert(col, row, placed)?;

        if col + 1 < self.grid.side() && !self.grid.is_placed(col + 1, row) {
            let neighbour = self.matching_neighbour(id, &right_border, Edge::Left)?;
            self.place(col + 1, row, neighbour)?;
        }
        if row + 1 < self.grid.side() && !self.grid.is_placed(col, row + 1) {
            let neighbour = self.matching_neighbour(id, &bottom_border, Edge::Top)?;
            self.place(col, row + 1, neighbour)?;
        }
        Ok(())
    }

    // Placement follows one edge only, so every other placed side is re-checked
    fn verify_placed_neighbours(
        &self,
        col: usize,
        row: usize,
        placed: &PlacedTile,
    ) -> Result<()> {
        let sides = [
            (col.checked_sub(1), Some(row), Edge::Right, Edge::Left),
            (Some(col), row.checked_sub(1), Edge::Bottom, Edge::Top),
            (col.checked_add(1), Some(row), Edge::Left, Edge::Right),
            (Some(col), row.checked_add(1), Edge::Top, Edge::Bottom),
        ];

        for (other_col, other_row, other_edge, own_edge) in sides {
            let (Some(other_col), Some(other_row)) = (other_col, other_row) else {
                continue;
            };
            let Some(other) = self.grid.get(other_col, other_row) else {
                continue;
            };
            if other.tile.border(other_edge) != placed.tile.border(own_edge) {
                return Err(malformed(&format!(
                    "tile {} at ({col}, {row}) does not fit against tile {}",
                    placed.id(),
                    other.id()
                )));
            }
        }
        Ok(())
    }

    fn matching_neighbour(
        &self,
        from: TileId,
        border: &Border,
        edge: Edge,
    ) -> Result<PlacedTile> {
        let neighbour_id = self.index.find_neighbour(from, border)?;
        let (orientation, tile) = self.tile(neighbour_id)?.orient_to_match(border, edge)?;
        Ok(PlacedTile { orientation, tile })
    }

    fn tile(&self, id: TileId) -> Result<&'a Tile> {
        self.tiles
            .get(&id)
            .copied()
            .ok_or_else(|| malformed(&format!("tile {id} is not part of the puzzle")))
    }
}
