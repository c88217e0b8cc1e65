//! Border signature index for adjacency discovery
//!
//! Every tile is recorded under all 8 of its border readings. Because the
//! set of readings is the same in every orientation, the index is built once
//! from the tiles as given and stays valid while tiles are re-oriented.

use crate::io::error::{Result, computation_error, malformed};
use crate::spatial::tiles::{Border, Tile, TileId};
use num_traits::{CheckedMul, One};
use std::collections::{HashMap, HashSet};

/// Number of distinct neighbours that identifies a corner tile
pub const CORNER_NEIGHBOURS: usize = 2;
/// Number of corner tiles in a square puzzle
pub const CORNER_COUNT: usize = 4;

/// Mapping from border signature to the tiles exposing it
#[derive(Debug, Clone, Default)]
pub struct BorderIndex {
    entries: HashMap<Border, Vec<TileId>>,
}

impl BorderIndex {
    /// Index every border reading of every tile
    ///
    /// # Errors
    ///
    /// Returns `MalformedPuzzle` if two tiles share an id or if a signature
    /// is exposed by more than two tiles
    pub fn build(tiles: &[Tile]) -> Result<Self> {
        let mut seen_ids = HashSet::with_capacity(tiles.len());
        let mut entries: HashMap<Border, Vec<TileId>> = HashMap::new();

        for tile in tiles {
            if !seen_ids.insert(tile.id()) {
                return Err(malformed(&format!("tile id {} appears twice", tile.id())));
            }
            for border in tile.borders() {
                let owners = entries.entry(border).or_default();
                // Palindromic edges read the same both ways
                if !owners.contains(&tile.id()) {
                    owners.push(tile.id());
                }
            }
        }

        if let Some((border, owners)) = entries.iter().find(|(_, owners)| owners.len() > 2) {
            return Err(malformed(&format!(
                "border {border} is shared by {} tiles {owners:?}",
                owners.len()
            )));
        }

        log::debug!(
            "indexed {} border signatures from {} tiles",
            entries.len(),
            tiles.len()
        );

        Ok(Self { entries })
    }

    /// Tiles exposing `border` on some reading
    pub fn tiles_with(&self, border: &Border) -> &[TileId] {
        self.entries.get(border).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `border` belongs to a single tile, i.e. lies on the puzzle outline
    pub fn is_outer(&self, border: &Border) -> bool {
        self.tiles_with(border).len() == 1
    }

    /// Number of distinct signatures
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no signature has been indexed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct other tiles sharing any border reading with `tile`
    ///
    /// Neighbours are listed in order of discovery.
    pub fn neighbours(&self, tile: &Tile) -> Vec<TileId> {
        let mut neighbours = Vec::new();
        for border in tile.borders() {
            for &other in self.tiles_with(&border) {
                if other != tile.id() && !neighbours.contains(&other) {
                    neighbours.push(other);
                }
            }
        }
        neighbours
    }

    /// Tiles with exactly two distinct neighbours, in input order
    ///
    /// # Errors
    ///
    /// Returns `MalformedPuzzle` unless exactly four corners are found
    pub fn find_corner_tiles(&self, tiles: &[Tile]) -> Result<Vec<TileId>> {
        let corners: Vec<TileId> = tiles
            .iter()
            .filter(|tile| self.neighbours(tile).len() == CORNER_NEIGHBOURS)
            .map(Tile::id)
            .collect();

        if corners.len() != CORNER_COUNT {
            return Err(malformed(&format!(
                "expected {CORNER_COUNT} corner tiles, found {} {corners:?}",
                corners.len()
            )));
        }

        log::debug!("corner tiles: {corners:?}");
        Ok(corners)
    }

    /// Product of the four corner tile ids
    ///
    /// # Errors
    ///
    /// Returns `MalformedPuzzle` if the corners cannot be identified, or a
    /// computation error if the product overflows
    pub fn corner_product(&self, tiles: &[Tile]) -> Result<TileId> {
        corner_id_product(&self.find_corner_tiles(tiles)?)
    }

    /// The unique tile other than `tile_id` exposing `border`
    ///
    /// # Errors
    ///
    /// Returns `MalformedPuzzle` if no other tile or several other tiles
    /// expose the border
    pub fn find_neighbour(&self, tile_id: TileId, border: &Border) -> Result<TileId> {
        let mut others = self
            .tiles_with(border)
            .iter()
            .copied()
            .filter(|&other| other != tile_id);

        match (others.next(), others.next()) {
            (Some(neighbour), None) => Ok(neighbour),
            (None, _) => Err(malformed(&format!(
                "no tile shares border {border} with tile {tile_id}"
            ))),
            (Some(first), Some(second)) => Err(malformed(&format!(
                "border {border} of tile {tile_id} is shared by both {first} and {second}"
            ))),
        }
    }
}

/// Checked product of already located corner ids
///
/// # Errors
///
/// Returns a computation error if the product overflows
pub fn corner_id_product(corners: &[TileId]) -> Result<TileId> {
    checked_product(corners).ok_or_else(|| {
        computation_error("corner product", &format!("{corners:?} overflows"))
    })
}

/// Multiply values, returning `None` on overflow
pub fn checked_product<T: CheckedMul + One + Copy>(values: &[T]) -> Option<T> {
    values
        .iter()
        .try_fold(T::one(), |product, value| product.checked_mul(value))
}
