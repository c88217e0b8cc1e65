//! Seeded generation of well-formed puzzles
//!
//! A hidden image is drawn first and optionally seeded with copies of a
//! reference pattern. The image is then spread over a canvas in which
//! neighbouring tiles share their border lines, so every internal edge
//! matches by construction. Border segments are redrawn until each one is
//! non-palindromic and distinct from every other segment in both reading
//! directions, which keeps neighbour lookups and orientation unambiguous.
//! Finally every tile is cut out, given an id and a random orientation, and
//! the tile list is shuffled.

use crate::analysis::patterns::ReferencePattern;
use crate::io::configuration::{
    DEFAULT_ACTIVE_DENSITY, DEFAULT_BORDER_ALPHABET, DEFAULT_SEED, DEFAULT_TILE_SIDE,
    MAX_SEGMENT_ATTEMPTS, MAX_TILE_ID, MIN_GENERATED_TILE_SIDE, MIN_TILE_ID,
};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::grid::AssembledImage;
use crate::spatial::orientation::Orientation;
use crate::spatial::tiles::{Border, Pixel, Tile, TileId};
use ndarray::{Array2, s};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::HashSet;

/// Settings for building a random puzzle
#[derive(Clone, Debug)]
pub struct PuzzleGenerator {
    side: usize,
    tile_side: usize,
    seed: u64,
    density: f64,
    border_alphabet: Vec<char>,
    planted: Option<(ReferencePattern, usize)>,
}

/// A generated puzzle together with its solution
#[derive(Clone, Debug)]
pub struct GeneratedPuzzle {
    /// Shuffled, randomly oriented tiles
    pub tiles: Vec<Tile>,
    /// True tile positions as `[row][col]`
    pub layout: Array2<TileId>,
    /// The image the tiles were cut from, borders excluded
    pub image: AssembledImage,
}

impl GeneratedPuzzle {
    /// Ids of the four layout corners: top-left, top-right, bottom-left, bottom-right
    pub fn corner_ids(&self) -> [TileId; 4] {
        let last = self.layout.nrows().saturating_sub(1);
        [(0, 0), (0, last), (last, 0), (last, last)]
            .map(|position| self.layout.get(position).copied().unwrap_or_default())
    }

    /// The tiles in puzzle text format
    pub fn to_text(&self) -> String {
        self.tiles.iter().map(|tile| format!("{tile}\n")).collect()
    }
}

impl Default for PuzzleGenerator {
    fn default() -> Self {
        Self::new(3)
    }
}

impl PuzzleGenerator {
    /// Generator for a `side x side` puzzle with default settings
    pub fn new(side: usize) -> Self {
        Self {
            side,
            tile_side: DEFAULT_TILE_SIDE,
            seed: DEFAULT_SEED,
            density: DEFAULT_ACTIVE_DENSITY,
            border_alphabet: DEFAULT_BORDER_ALPHABET.to_vec(),
            planted: None,
        }
    }

    /// Set the side length of every tile
    #[must_use]
    pub const fn with_tile_side(mut self, tile_side: usize) -> Self {
        self.tile_side = tile_side;
        self
    }

    /// Set the random seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the fraction of hidden image cells that start active
    #[must_use]
    pub const fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Set the symbols drawn for border lines
    #[must_use]
    pub fn with_border_alphabet(mut self, alphabet: &[char]) -> Self {
        self.border_alphabet = alphabet.to_vec();
        self
    }

    /// Plant `copies` instances of `pattern` in the hidden image
    #[must_use]
    pub fn with_pattern(mut self, pattern: ReferencePattern, copies: usize) -> Self {
        self.planted = Some((pattern, copies));
        self
    }

    /// Build a puzzle
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for unusable settings, or when no set of
    /// distinct border segments can be drawn from the alphabet
    pub fn generate(&self) -> Result<GeneratedPuzzle> {
        self.validate()?;
        let mut rng = StdRng::seed_from_u64(self.seed);

        let image = self.hidden_image(&mut rng)?;
        let canvas = self.canvas(&image, &mut rng)?;

        let step = self.tile_side - 1;
        let id_range = usize::try_from(MAX_TILE_ID - MIN_TILE_ID).unwrap_or(usize::MAX);
        let ids = rand::seq::index::sample(&mut rng, id_range, self.side * self.side);

        let mut layout = Array2::zeros((self.side, self.side));
        let mut tiles = Vec::with_capacity(self.side * self.side);
        for (position, offset) in ids.into_iter().enumerate() {
            let (row, col) = (position / self.side, position % self.side);
            let id = MIN_TILE_ID + offset as TileId;
            let pixels = canvas
                .slice(s![
                    row * step..row * step + self.tile_side,
                    col * step..col * step + self.tile_side
                ])
                .to_owned();
            let orientation = Orientation::ALL
                .choose(&mut rng)
                .copied()
                .unwrap_or_default();

            if let Some(cell) = layout.get_mut((row, col)) {
                *cell = id;
            }
            tiles.push(Tile::new(id, pixels)?.oriented(orientation));
        }
        tiles.shuffle(&mut rng);

        log::debug!(
            "generated {0}x{0} puzzle of {1}x{1} tiles with seed {2}",
            self.side,
            self.tile_side,
            self.seed
        );

        Ok(GeneratedPuzzle {
            tiles,
            layout,
            image,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.side < 2 {
            return Err(invalid_parameter(
                "side",
                &self.side,
                &"a puzzle needs at least 2x2 tiles",
            ));
        }
        if (MAX_TILE_ID - MIN_TILE_ID) < (self.side * self.side) as TileId {
            return Err(invalid_parameter(
                "side",
                &self.side,
                &"too many tiles for four-digit ids",
            ));
        }
        // One middle cell cannot break a palindrome between equal corners
        if self.tile_side < MIN_GENERATED_TILE_SIDE {
            return Err(invalid_parameter(
                "tile_side",
                &self.tile_side,
                &format!("generated tiles need a side of at least {MIN_GENERATED_TILE_SIDE}"),
            ));
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(invalid_parameter(
                "density",
                &self.density,
                &"must lie between 0 and 1",
            ));
        }
        if self.border_alphabet.is_empty() || self.border_alphabet.iter().any(|c| c.is_whitespace())
        {
            return Err(invalid_parameter(
                "border_alphabet",
                &self.border_alphabet.iter().collect::<String>(),
                &"needs at least one non-whitespace symbol",
            ));
        }
        Ok(())
    }

    fn hidden_image(&self, rng: &mut StdRng) -> Result<AssembledImage> {
        let image_side = self.side * (self.tile_side - 2);
        let mut pixels = Array2::from_shape_fn((image_side, image_side), |_| {
            if rng.random_bool(self.density) {
                Pixel::ACTIVE
            } else {
                Pixel::INACTIVE
            }
        });

        if let Some((pattern, copies)) = &self.planted {
            if pattern.width() > image_side || pattern.height() > image_side {
                return Err(invalid_parameter(
                    "pattern",
                    &format!("{}x{}", pattern.width(), pattern.height()),
                    &format!("does not fit a {image_side}x{image_side} image"),
                ));
            }
            for _ in 0..*copies {
                let x = rng.random_range(0..=image_side - pattern.width());
                let y = rng.random_range(0..=image_side - pattern.height());
                for &[dx, dy] in pattern.offsets() {
                    if let Some(cell) = pixels.get_mut((y + dy, x + dx)) {
                        *cell = Pixel::ACTIVE;
                    }
                }
            }
        }

        Ok(AssembledImage::new(pixels))
    }

    // Adjacent tiles overlap by one line, so lines at multiples of `step` are shared borders
    fn canvas(&self, image: &AssembledImage, rng: &mut StdRng) -> Result<Array2<Pixel>> {
        let step = self.tile_side - 1;
        let interior = self.tile_side - 2;
        let canvas_side = self.side * step + 1;
        let mut canvas = Array2::from_elem((canvas_side, canvas_side), Pixel::INACTIVE);

        for ((y, x), &pixel) in image.pixels().indexed_iter() {
            let (row, col) = (y / interior, x / interior);
            let target = (
                row * step + 1 + y % interior,
                col * step + 1 + x % interior,
            );
            if let Some(cell) = canvas.get_mut(target) {
                *cell = pixel;
            }
        }

        for row in 0..=self.side {
            for col in 0..=self.side {
                if let Some(cell) = canvas.get_mut((row * step, col * step)) {
                    *cell = self.random_symbol(rng);
                }
            }
        }

        let mut seen = HashSet::new();
        for line in 0..=self.side {
            for segment in 0..self.side {
                let horizontal: Vec<(usize, usize)> = (0..=step)
                    .map(|offset| (line * step, segment * step + offset))
                    .collect();
                self.draw_segment(&mut canvas, &horizontal, &mut seen, rng)?;

                let vertical: Vec<(usize, usize)> = (0..=step)
                    .map(|offset| (segment * step + offset, line * step))
                    .collect();
                self.draw_segment(&mut canvas, &vertical, &mut seen, rng)?;
            }
        }

        Ok(canvas)
    }

    // The first and last cells are lattice corners and stay fixed
    fn draw_segment(
        &self,
        canvas: &mut Array2<Pixel>,
        cells: &[(usize, usize)],
        seen: &mut HashSet<Border>,
        rng: &mut StdRng,
    ) -> Result<()> {
        let middle = cells.get(1..cells.len().saturating_sub(1)).unwrap_or(&[]);

        for _ in 0..MAX_SEGMENT_ATTEMPTS {
            for &cell in middle {
                if let Some(pixel) = canvas.get_mut(cell) {
                    *pixel = self.random_symbol(rng);
                }
            }
            let border = Border::from_pixels(
                cells
                    .iter()
                    .map(|&cell| canvas.get(cell).copied().unwrap_or_default()),
            );
            if !border.is_palindrome()
                && !seen.contains(&border)
                && !seen.contains(&border.reversed())
            {
                seen.insert(border);
                return Ok(());
            }
        }

        Err(invalid_parameter(
            "border_alphabet",
            &self.border_alphabet.iter().collect::<String>(),
            &format!(
                "no distinct border found after {MAX_SEGMENT_ATTEMPTS} attempts for tile side {}",
                self.tile_side
            ),
        ))
    }

    fn random_symbol(&self, rng: &mut StdRng) -> Pixel {
        self.border_alphabet
            .choose(rng)
            .copied()
            .map_or(Pixel::INACTIVE, Pixel::from)
    }
}
