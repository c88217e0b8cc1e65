//! Reassembly of rotated and mirrored image tiles
//!
//! Tiles are matched along their borders, placed from a corner outward and
//! stitched into one image with their border rings removed. The image is
//! then scanned in all eight orientations for a reference pattern, and the
//! active pixels outside every match are counted.

#![deny(unsafe_code)]

/// Border indexing, assembly, solving and puzzle generation
pub mod algorithm;
/// Pattern scanning over assembled images
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Tiles, orientations and placement grids
pub mod spatial;

pub use io::error::{PuzzleError, Result};
