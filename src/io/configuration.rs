//! Puzzle constants and runtime configuration defaults

/// Symbol of an active pixel
pub const ACTIVE_SYMBOL: char = '#';
/// Symbol of an inactive pixel
pub const INACTIVE_SYMBOL: char = '.';

/// Rows of the default reference pattern (the "sea monster")
///
/// `#` marks a cell that must be active; every other character is ignored.
pub const DEFAULT_PATTERN_ROWS: [&str; 3] = [
    "                  # ",
    "#    ##    ##    ###",
    " #  #  #  #  #  #   ",
];

// A tile needs at least one interior pixel once its border ring is removed
/// Smallest accepted tile side length
pub const MIN_TILE_SIDE: usize = 3;

/// Extension of puzzle files collected from a directory target
pub const PUZZLE_EXTENSION: &str = "txt";
/// Suffix added to exported image filenames
pub const IMAGE_SUFFIX: &str = "_image";

// PNG colours for the debug export
/// Colour of active pixels
pub const ACTIVE_COLOR: [u8; 4] = [30, 110, 200, 255];
/// Colour of inactive pixels
pub const INACTIVE_COLOR: [u8; 4] = [10, 20, 40, 255];
/// Colour of pixels covered by a pattern match
pub const PATTERN_COLOR: [u8; 4] = [240, 200, 40, 255];
/// Colour of symbols that are neither active nor inactive
pub const OTHER_SYMBOL_COLOR: [u8; 4] = [128, 128, 128, 255];

// Synthetic puzzle defaults
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Tile side length used by generated puzzles
pub const DEFAULT_TILE_SIDE: usize = 10;
/// Smallest tile side the generator accepts
pub const MIN_GENERATED_TILE_SIDE: usize = 4;
/// Fraction of hidden image cells that are active
pub const DEFAULT_ACTIVE_DENSITY: f64 = 0.1;
/// Symbols drawn for tile border lines
pub const DEFAULT_BORDER_ALPHABET: [char; 2] = [ACTIVE_SYMBOL, INACTIVE_SYMBOL];
/// Redraws allowed per border segment before generation gives up
pub const MAX_SEGMENT_ATTEMPTS: usize = 1_000;

// Tile ids are four-digit numbers
/// Smallest generated tile id
pub const MIN_TILE_ID: u64 = 1_000;
/// One past the largest generated tile id
pub const MAX_TILE_ID: u64 = 10_000;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
