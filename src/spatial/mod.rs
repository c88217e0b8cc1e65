//! Spatial data structures and grid manipulation
//!
//! This module contains spatial-related functionality including:
//! - The eight orientations of a square grid
//! - Tile and border data structures
//! - Placement grid and stitched image state

/// Placement grid and assembled image
pub mod grid;
/// Dihedral orientations of square grids
pub mod orientation;
/// Tiles, pixels and border signatures
pub mod tiles;

pub use grid::{AssembledImage, PlacementGrid};
pub use orientation::Orientation;
pub use tiles::{Tile, TileId};
