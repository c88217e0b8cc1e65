//! Tiles, pixels and border signatures
//!
//! A tile is an identified square grid of symbolic pixels. Tiles are values:
//! re-orienting a tile produces a new tile carrying the same id, so several
//! candidate orientations can be compared without aliasing.

use crate::io::configuration::{ACTIVE_SYMBOL, INACTIVE_SYMBOL, MIN_TILE_SIDE};
use crate::io::error::{Result, malformed};
use crate::spatial::orientation::{
    Orientation, Orientations, flip_horizontal, flip_vertical, orientations, rotate_clockwise,
};
use ndarray::{Array2, ArrayView2, s};
use std::fmt;

/// Tile identifier as written in the puzzle header
pub type TileId = u64;

/// A single symbolic pixel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pixel(char);

impl Pixel {
    /// Active pixel (`#`)
    pub const ACTIVE: Self = Self(ACTIVE_SYMBOL);
    /// Inactive pixel (`.`)
    pub const INACTIVE: Self = Self(INACTIVE_SYMBOL);

    /// Wrap a symbol
    pub const fn new(symbol: char) -> Self {
        Self(symbol)
    }

    /// The symbol this pixel was read from
    pub const fn symbol(self) -> char {
        self.0
    }

    /// Whether the pixel counts as active for pattern matching
    pub const fn is_active(self) -> bool {
        self.0 == ACTIVE_SYMBOL
    }
}

impl Default for Pixel {
    fn default() -> Self {
        Self::INACTIVE
    }
}

impl From<char> for Pixel {
    fn from(symbol: char) -> Self {
        Self(symbol)
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pixels read along one tile edge in one direction
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Border(Vec<Pixel>);

impl Border {
    /// Build a border from pixels in reading order
    pub fn from_pixels(pixels: impl IntoIterator<Item = Pixel>) -> Self {
        Self(pixels.into_iter().collect())
    }

    /// The same edge read in the opposite direction
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self(self.0.iter().rev().copied().collect())
    }

    /// Whether both reading directions give the same signature
    pub fn is_palindrome(&self) -> bool {
        self.0.iter().eq(self.0.iter().rev())
    }

    /// Number of pixels along the edge
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the border holds no pixels
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pixels in reading order
    pub fn pixels(&self) -> &[Pixel] {
        &self.0
    }
}

impl From<&str> for Border {
    fn from(symbols: &str) -> Self {
        Self(symbols.chars().map(Pixel::from).collect())
    }
}

impl fmt::Display for Border {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|pixel| write!(f, "{pixel}"))
    }
}

/// One of the four tile edges
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// First row, read left to right
    Top,
    /// Last row, read left to right
    Bottom,
    /// First column, read top to bottom
    Left,
    /// Last column, read top to bottom
    Right,
}

impl Edge {
    /// All edges in border-reading order
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// Read this edge of a grid
    pub fn read(self, grid: &ArrayView2<'_, Pixel>) -> Border {
        let (rows, cols) = grid.dim();
        match self {
            Self::Top => Border::from_pixels(grid.row(0).iter().copied()),
            Self::Bottom => Border::from_pixels(grid.row(rows.saturating_sub(1)).iter().copied()),
            Self::Left => Border::from_pixels(grid.column(0).iter().copied()),
            Self::Right => {
                Border::from_pixels(grid.column(cols.saturating_sub(1)).iter().copied())
            }
        }
    }
}

/// An identified square grid of pixels
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    pixels: Array2<Pixel>,
}

impl Tile {
    /// Create a tile from its id and pixel grid
    ///
    /// # Errors
    ///
    /// Returns `MalformedPuzzle` if the grid is not square or is smaller than
    /// the minimum tile side
    pub fn new(id: TileId, pixels: Array2<Pixel>) -> Result<Self> {
        let (rows, cols) = pixels.dim();
        if rows != cols {
            return Err(malformed(&format!(
                "tile {id} is {rows}x{cols}, tiles must be square"
            )));
        }
        if rows < MIN_TILE_SIDE {
            return Err(malformed(&format!(
                "tile {id} has side {rows}, the minimum is {MIN_TILE_SIDE}"
            )));
        }
        Ok(Self { id, pixels })
    }

    /// Build a tile from rows of symbols
    ///
    /// # Errors
    ///
    /// Returns `MalformedPuzzle` if the rows are ragged, not square or too small
    pub fn from_rows(id: TileId, rows: &[&str]) -> Result<Self> {
        let side = rows.len();
        let symbols: Vec<Pixel> = rows
            .iter()
            .flat_map(|row| row.chars().map(Pixel::from))
            .collect();
        if rows.iter().any(|row| row.chars().count() != side) {
            return Err(malformed(&format!("tile {id} rows must all have length {side}")));
        }
        let pixels = Array2::from_shape_vec((side, side), symbols)
            .map_err(|e| malformed(&format!("tile {id}: {e}")))?;
        Self::new(id, pixels)
    }

    /// Tile identifier
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// Side length in pixels
    pub fn side(&self) -> usize {
        self.pixels.nrows()
    }

    /// The pixel grid in its current orientation
    pub const fn pixels(&self) -> &Array2<Pixel> {
        &self.pixels
    }

    /// Read one edge
    pub fn border(&self, edge: Edge) -> Border {
        edge.read(&self.pixels.view())
    }

    /// All 8 border readings: top, bottom, left, right, then their reverses
    pub fn borders(&self) -> [Border; 8] {
        let [top, bottom, left, right] = Edge::ALL.map(|edge| self.border(edge));
        let reversed = [&top, &bottom, &left, &right].map(Border::reversed);
        let [top_rev, bottom_rev, left_rev, right_rev] = reversed;
        [
            top, bottom, left, right, top_rev, bottom_rev, left_rev, right_rev,
        ]
    }

    /// Copy of this tile rotated 90° clockwise
    #[must_use]
    pub fn rotated(&self) -> Self {
        self.with_pixels(rotate_clockwise(&self.pixels.view()))
    }

    /// Copy of this tile with every row reversed
    #[must_use]
    pub fn flipped_horizontal(&self) -> Self {
        self.with_pixels(flip_horizontal(&self.pixels.view()))
    }

    /// Copy of this tile with the row order reversed
    #[must_use]
    pub fn flipped_vertical(&self) -> Self {
        self.with_pixels(flip_vertical(&self.pixels.view()))
    }

    /// Copy of this tile in the given orientation
    #[must_use]
    pub fn oriented(&self, orientation: Orientation) -> Self {
        self.with_pixels(orientation.apply(&self.pixels.view()))
    }

    /// Lazily iterate over the 8 orientations of this tile's grid
    pub fn orientations(&self) -> Orientations<'_, Pixel> {
        orientations(self.pixels.view())
    }

    /// Orient the tile so that `edge` reads exactly `target`
    ///
    /// Returns the applied orientation together with the re-oriented tile.
    /// Orientations producing identical grids (symmetric tiles) count once.
    ///
    /// # Errors
    ///
    /// Returns `MalformedPuzzle` if no orientation matches, or if two
    /// orientations producing different grids both match, since placement
    /// could then pick the wrong one
    pub fn orient_to_match(&self, target: &Border, edge: Edge) -> Result<(Orientation, Self)> {
        let mut found: Option<(Orientation, Array2<Pixel>)> = None;

        for (orientation, grid) in self.orientations() {
            if edge.read(&grid.view()) != *target {
                continue;
            }
            if let Some((first, existing)) = &found {
                if *existing != grid {
                    return Err(malformed(&format!(
                        "tile {} matches {target} on its {edge:?} edge in both {first} and {orientation}",
                        self.id
                    )));
                }
                continue;
            }
            found = Some((orientation, grid));
        }

        found
            .map(|(orientation, grid)| (orientation, self.with_pixels(grid)))
            .ok_or_else(|| {
                malformed(&format!(
                    "no orientation of tile {} shows {target} on its {edge:?} edge",
                    self.id
                ))
            })
    }

    /// The grid with its outermost ring of pixels removed
    pub fn interior(&self) -> Array2<Pixel> {
        let side = self.side();
        self.pixels.slice(s![1..side - 1, 1..side - 1]).to_owned()
    }

    fn with_pixels(&self, pixels: Array2<Pixel>) -> Self {
        Self {
            id: self.id,
            pixels,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tile {}:", self.id)?;
        write_grid(f, &self.pixels.view())
    }
}

/// Write a grid as newline-terminated rows of symbols
///
/// # Errors
///
/// Propagates formatter errors
pub fn write_grid(f: &mut fmt::Formatter<'_>, grid: &ArrayView2<'_, Pixel>) -> fmt::Result {
    for row in grid.rows() {
        for pixel in row {
            write!(f, "{pixel}")?;
        }
        writeln!(f)?;
    }
    Ok(())
}
