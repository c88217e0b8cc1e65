//! Error types and context management for puzzle operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all puzzle operations
#[derive(Debug)]
pub enum PuzzleError {
    /// Tile set violates a structural invariant of a well-formed puzzle
    ///
    /// Raised for:
    /// - Tile counts that are not a perfect square
    /// - Border signatures shared by the wrong number of tiles
    /// - Tiles that cannot be oriented to match a placed neighbour
    MalformedPuzzle {
        /// Description of the violated invariant
        reason: String,
    },

    /// No orientation of the assembled image contains the reference pattern
    NoPatternFound {
        /// Side length of the assembled image
        image_side: usize,
        /// Number of orientations that were scanned
        orientations_tried: usize,
    },

    /// Tile text could not be parsed
    Parse {
        /// One-based line number where parsing failed
        line: usize,
        /// Description of what's wrong with the line
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Numerical computation produced invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// Failed to save the assembled image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The global logger was already installed
    Logger {
        /// Underlying logger error
        source: log::SetLoggerError,
    },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedPuzzle { reason } => {
                write!(f, "Malformed puzzle: {reason}")
            }
            Self::NoPatternFound {
                image_side,
                orientations_tried,
            } => {
                write!(
                    f,
                    "No pattern match in any of {orientations_tried} orientations of the {image_side}x{image_side} image"
                )
            }
            Self::Parse { line, reason } => {
                write!(f, "Parse error on line {line}: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Logger { source } => {
                write!(f, "Failed to initialise logging: {source}")
            }
        }
    }
}

impl std::error::Error for PuzzleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Logger { source } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for puzzle results
pub type Result<T> = std::result::Result<T, PuzzleError>;

/// Attaches a file path to errors raised while handling that file
pub trait WithPath<T> {
    /// Replace an unknown path in file system errors with `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<PuzzleError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only errors that carry a path benefit from the context
            if let PuzzleError::FileSystem { path: unknown, .. } = &mut error {
                if unknown.as_os_str() == UNKNOWN_PATH {
                    *unknown = path.to_path_buf();
                }
            }
            error
        })
    }
}

const UNKNOWN_PATH: &str = "<unknown>";

impl From<std::io::Error> for PuzzleError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from(UNKNOWN_PATH),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<log::SetLoggerError> for PuzzleError {
    fn from(err: log::SetLoggerError) -> Self {
        Self::Logger { source: err }
    }
}

/// Create a malformed puzzle error
pub fn malformed(reason: &impl ToString) -> PuzzleError {
    PuzzleError::MalformedPuzzle {
        reason: reason.to_string(),
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PuzzleError {
    PuzzleError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> PuzzleError {
    PuzzleError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create a parse error for a one-based line number
pub fn parse_error(line: usize, reason: &impl ToString) -> PuzzleError {
    PuzzleError::Parse {
        line,
        reason: reason.to_string(),
    }
}

/// Create an error for an unusable input path
pub fn io_error(msg: &str) -> PuzzleError {
    PuzzleError::InvalidParameter {
        parameter: "path",
        value: String::new(),
        reason: msg.to_string(),
    }
}
