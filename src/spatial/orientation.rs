//! Orientation engine over the dihedral group of the square
//!
//! Every rigid motion of a square grid is a clockwise rotation by a number of
//! quarter turns optionally followed by a horizontal flip. Grids are never
//! transformed in place: applying an orientation returns a new array.

use ndarray::{Array2, ArrayView2, s};
use std::fmt;

/// One of the 8 rigid orientations of a square grid
///
/// Applied as `rotation` clockwise quarter turns followed by a horizontal
/// flip when `flip` is set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Orientation {
    /// Clockwise quarter turns (0-3)
    pub rotation: u8,
    /// Horizontal flip applied after rotation
    pub flip: bool,
}

impl Orientation {
    /// No transformation
    pub const IDENTITY: Self = Self {
        rotation: 0,
        flip: false,
    };
    /// 90° clockwise rotation
    pub const ROTATE_90: Self = Self {
        rotation: 1,
        flip: false,
    };
    /// 180° rotation
    pub const ROTATE_180: Self = Self {
        rotation: 2,
        flip: false,
    };
    /// 270° clockwise rotation
    pub const ROTATE_270: Self = Self {
        rotation: 3,
        flip: false,
    };
    /// Mirror each row
    pub const FLIP_H: Self = Self {
        rotation: 0,
        flip: true,
    };
    /// Reflect over the main diagonal
    pub const TRANSPOSE: Self = Self {
        rotation: 1,
        flip: true,
    };
    /// Reverse the row order
    pub const FLIP_V: Self = Self {
        rotation: 2,
        flip: true,
    };
    /// Reflect over the anti-diagonal
    pub const TRANSVERSE: Self = Self {
        rotation: 3,
        flip: true,
    };

    /// All 8 orientations: the four rotations, then the four mirrored rotations
    pub const ALL: [Self; 8] = [
        Self::IDENTITY,
        Self::ROTATE_90,
        Self::ROTATE_180,
        Self::ROTATE_270,
        Self::FLIP_H,
        Self::TRANSPOSE,
        Self::FLIP_V,
        Self::TRANSVERSE,
    ];

    /// Whether this is the identity transformation
    pub const fn is_identity(self) -> bool {
        self.rotation == 0 && !self.flip
    }

    /// Compose two orientations: apply `self` first, then `other`
    #[must_use]
    pub const fn compose(self, other: Self) -> Self {
        if self.flip {
            // A flip reverses the direction of any rotation that follows it
            Self {
                rotation: self.rotation.wrapping_sub(other.rotation) & 3,
                flip: !other.flip,
            }
        } else {
            Self {
                rotation: (self.rotation + other.rotation) & 3,
                flip: other.flip,
            }
        }
    }

    /// The orientation undoing this one
    #[must_use]
    pub const fn inverse(self) -> Self {
        if self.flip {
            self
        } else {
            Self {
                rotation: (4 - self.rotation) & 3,
                flip: false,
            }
        }
    }

    /// Apply this orientation to a grid, returning the transformed copy
    pub fn apply<T: Clone>(self, grid: &ArrayView2<'_, T>) -> Array2<T> {
        let mut current = grid.to_owned();
        for _ in 0..(self.rotation & 3) {
            current = rotate_clockwise(&current.view());
        }
        if self.flip {
            current = flip_horizontal(&current.view());
        }
        current
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let degrees = u16::from(self.rotation & 3) * 90;
        if self.flip {
            write!(f, "rotate {degrees}° + flip")
        } else {
            write!(f, "rotate {degrees}°")
        }
    }
}

/// Rotate a grid 90° clockwise: `new[i][j] = old[rows - 1 - j][i]`
pub fn rotate_clockwise<T: Clone>(grid: &ArrayView2<'_, T>) -> Array2<T> {
    grid.t().slice(s![.., ..;-1]).to_owned()
}

/// Reverse every row of a grid
pub fn flip_horizontal<T: Clone>(grid: &ArrayView2<'_, T>) -> Array2<T> {
    grid.slice(s![.., ..;-1]).to_owned()
}

/// Reverse the row order of a grid
pub fn flip_vertical<T: Clone>(grid: &ArrayView2<'_, T>) -> Array2<T> {
    grid.slice(s![..;-1, ..]).to_owned()
}

/// Lazy iterator over all 8 orientations of a grid
///
/// Each step builds one transformed copy. Cloning the iterator restarts
/// from the same position, so the sequence can be replayed.
#[derive(Clone, Debug)]
pub struct Orientations<'a, T> {
    grid: ArrayView2<'a, T>,
    next_index: usize,
}

/// Iterate over every orientation of `grid` in [`Orientation::ALL`] order
pub const fn orientations<'a, T>(grid: ArrayView2<'a, T>) -> Orientations<'a, T> {
    Orientations {
        grid,
        next_index: 0,
    }
}

impl<T: Clone> Iterator for Orientations<'_, T> {
    type Item = (Orientation, Array2<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let orientation = Orientation::ALL.get(self.next_index).copied()?;
        self.next_index += 1;
        Some((orientation, orientation.apply(&self.grid)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = Orientation::ALL.len().saturating_sub(self.next_index);
        (remaining, Some(remaining))
    }
}

impl<T: Clone> ExactSizeIterator for Orientations<'_, T> {}
