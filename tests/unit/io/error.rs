//! Tests for error formatting and context propagation

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::path::{Path, PathBuf};
    use tilestitch::PuzzleError;
    use tilestitch::io::error::{
        WithPath, computation_error, invalid_parameter, io_error, malformed, parse_error,
    };

    // Tests the display text of each helper
    #[test]
    fn test_helper_messages() {
        assert_eq!(
            malformed(&"10 tiles").to_string(),
            "Malformed puzzle: 10 tiles"
        );
        assert_eq!(
            parse_error(4, &"bad row").to_string(),
            "Parse error on line 4: bad row"
        );
        assert_eq!(
            invalid_parameter("density", &1.5, &"too high").to_string(),
            "Invalid parameter 'density' = '1.5': too high"
        );
        assert_eq!(
            computation_error("corner product", &"overflow").to_string(),
            "Computation error in corner product: overflow"
        );
        assert!(matches!(
            io_error("not a file"),
            PuzzleError::InvalidParameter {
                parameter: "path",
                ..
            }
        ));
    }

    #[test]
    fn test_no_pattern_found_message() {
        let err = PuzzleError::NoPatternFound {
            image_side: 24,
            orientations_tried: 8,
        };
        assert_eq!(
            err.to_string(),
            "No pattern match in any of 8 orientations of the 24x24 image"
        );
        assert!(err.source().is_none());
    }

    // Tests that io errors convert with an unknown path that `with_path` fills
    #[test]
    fn test_io_conversion_and_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let converted = PuzzleError::from(io);
        assert!(converted.to_string().contains("<unknown>"));
        assert!(converted.source().is_some());

        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        match result.with_path(Path::new("tiles/input.txt")) {
            Err(PuzzleError::FileSystem { path, .. }) => {
                assert_eq!(path, PathBuf::from("tiles/input.txt"));
            }
            other => unreachable!("Expected FileSystem error, got {other:?}"),
        }
    }

    // Tests that non file system errors pass through unchanged
    #[test]
    fn test_with_path_keeps_other_errors() {
        let result: std::result::Result<(), PuzzleError> = Err(malformed(&"bad"));
        assert!(matches!(
            result.with_path(Path::new("x.txt")),
            Err(PuzzleError::MalformedPuzzle { .. })
        ));
        let ok: std::result::Result<u8, PuzzleError> = Ok(3);
        assert_eq!(ok.with_path(Path::new("x.txt")).unwrap(), 3);
    }
}
