//! Analysis of assembled images

/// Reference patterns and the orientation-aware scanner
pub mod patterns;
