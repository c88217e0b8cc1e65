//! Tests for reference patterns and the multi-orientation scan

#[cfg(test)]
mod tests {
    use tilestitch::PuzzleError;
    use tilestitch::analysis::patterns::{ReferencePattern, scan};
    use tilestitch::spatial::grid::AssembledImage;
    use tilestitch::spatial::orientation::Orientation;

    fn corner_pattern() -> ReferencePattern {
        ReferencePattern::from_rows(&["##", "#."]).unwrap()
    }

    // Tests the bounding box and offsets derived from text rows
    #[test]
    fn test_from_rows() {
        let pattern = ReferencePattern::from_rows(&["..#", "#.."]).unwrap();
        assert_eq!(pattern.width(), 3);
        assert_eq!(pattern.height(), 2);
        assert_eq!(pattern.offsets(), &[[2, 0], [0, 1]]);
        assert_eq!(pattern.active_cells(), 2);
    }

    // Tests the built-in sea monster shape
    #[test]
    fn test_sea_monster() {
        let pattern = ReferencePattern::sea_monster().unwrap();
        assert_eq!(pattern.width(), 20);
        assert_eq!(pattern.height(), 3);
        assert_eq!(pattern.active_cells(), 15);
    }

    // Tests that duplicate offsets are merged and empty patterns rejected
    #[test]
    fn test_new() {
        let pattern = ReferencePattern::new(vec![[1, 1], [0, 0], [1, 1]]).unwrap();
        assert_eq!(pattern.offsets(), &[[0, 0], [1, 1]]);

        assert!(matches!(
            ReferencePattern::new(Vec::new()),
            Err(PuzzleError::InvalidParameter { .. })
        ));
        assert!(ReferencePattern::from_rows(&["...", "..."]).is_err());
    }

    #[test]
    fn test_from_str() {
        let pattern: ReferencePattern = "##\n#.\n".parse().unwrap();
        assert_eq!(pattern, corner_pattern());
    }

    // Tests matching at single positions and over a whole grid
    #[test]
    fn test_find_matches() {
        let image = AssembledImage::from_rows(&["##..", "#.##", "..#.", "...."]).unwrap();
        let pattern = corner_pattern();

        assert!(pattern.matches_at(&image.view(), 0, 0));
        assert!(!pattern.matches_at(&image.view(), 1, 0));
        assert!(!pattern.matches_at(&image.view(), 3, 3));
        assert_eq!(pattern.find_matches(&image.view()), vec![[0, 0], [2, 1]]);
    }

    // Tests that overlapping matches cover shared cells once
    #[test]
    fn test_coverage_overlap() {
        let pattern = ReferencePattern::from_rows(&["##"]).unwrap();
        let covered = pattern.coverage((1, 3), &[[0, 0], [1, 0]]);
        assert_eq!(covered.count(), 3);
    }

    // Tests roughness for one planted instance
    #[test]
    fn test_scan_single_instance() {
        let image = AssembledImage::from_rows(&["##...", "#....", "....#", ".#...", "....."]).unwrap();
        let report = scan(&image, &corner_pattern()).unwrap();

        assert_eq!(report.orientation, Orientation::IDENTITY);
        assert_eq!(report.placements, vec![[0, 0]]);
        assert_eq!(report.covered_cells(), 3);
        assert_eq!(report.active_cells, 5);
        assert_eq!(report.roughness(), image.active_count() - 3);
    }

    // Tests that a pattern visible only after reorienting is found
    #[test]
    fn test_scan_rotated_instance() {
        // The corner shape opens to the bottom-right only after a half turn
        let image = AssembledImage::from_rows(&["....", "...#", "..##", "...."]).unwrap();
        let report = scan(&image, &corner_pattern()).unwrap();

        assert!(!report.orientation.is_identity());
        let oriented = image.oriented(report.orientation);
        for [x, y] in &report.placements {
            assert!(corner_pattern().matches_at(&oriented.view(), *x, *y));
        }
        assert_eq!(report.roughness(), 0);
    }

    // Tests that a single-cell pattern always leaves nothing uncovered
    #[test]
    fn test_scan_single_cell_pattern() {
        let pattern = ReferencePattern::from_rows(&["#"]).unwrap();
        let image = AssembledImage::from_rows(&["#.#", ".##", "#.."]).unwrap();
        let report = scan(&image, &pattern).unwrap();
        assert_eq!(report.roughness(), 0);
        assert_eq!(report.placements.len(), image.active_count());
    }

    // Tests the distinct failure when no orientation matches
    #[test]
    fn test_scan_no_match() {
        let image = AssembledImage::from_rows(&["#..", "...", "..#"]).unwrap();
        let result = scan(&image, &corner_pattern());
        assert!(matches!(
            result,
            Err(PuzzleError::NoPatternFound {
                image_side: 3,
                orientations_tried: 8
            })
        ));
    }

    // Tests that patterns larger than the image and empty images never match
    #[test]
    fn test_scan_degenerate_images() {
        let small = AssembledImage::from_rows(&["##", "##"]).unwrap();
        let wide = ReferencePattern::from_rows(&["###"]).unwrap();
        assert!(matches!(
            scan(&small, &wide),
            Err(PuzzleError::NoPatternFound { .. })
        ));

        let empty = AssembledImage::from_rows(&[]).unwrap();
        let single = ReferencePattern::from_rows(&["#"]).unwrap();
        assert!(matches!(
            scan(&empty, &single),
            Err(PuzzleError::NoPatternFound { image_side: 0, .. })
        ));
    }
}
