//! Input/output operations and error handling

/// Command-line interface and file processing
pub mod cli;
/// Constants shared across the crate
pub mod configuration;
/// Error types
pub mod error;
/// PNG rendering of assembled images
pub mod image;
/// Logger setup
pub mod logging;
/// Tile text parsing
pub mod parse;
/// Progress display
pub mod progress;
