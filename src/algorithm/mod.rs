/// Recursive placement of oriented tiles from a canonical corner
pub mod assembly;
/// Bit-packed cell sets for pattern coverage
pub mod bitset;
/// Border signature index and corner detection
pub mod borders;
/// Seeded generation of solvable puzzles
pub mod generator;
/// End-to-end puzzle solving
pub mod solver;
