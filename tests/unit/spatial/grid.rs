//! Tests for the placement grid and assembled image

#[cfg(test)]
mod tests {
    use ndarray::array;
    use tilestitch::PuzzleError;
    use tilestitch::spatial::grid::{AssembledImage, PlacedTile, PlacementGrid};
    use tilestitch::spatial::orientation::Orientation;
    use tilestitch::spatial::tiles::{Pixel, Tile};

    fn placed(id: u64, rows: &[&str]) -> PlacedTile {
        PlacedTile {
            orientation: Orientation::IDENTITY,
            tile: Tile::from_rows(id, rows).unwrap(),
        }
    }

    // Four tiles sharing their inner edges, each with a one-pixel interior
    fn two_by_two() -> PlacementGrid {
        let mut grid = PlacementGrid::new(2);
        grid.insert(0, 0, placed(1, &["abc", "d#e", "fgh"])).unwrap();
        grid.insert(1, 0, placed(2, &["cij", "e.k", "hlm"])).unwrap();
        grid.insert(0, 1, placed(3, &["fgh", "n.o", "pqr"])).unwrap();
        grid.insert(1, 1, placed(4, &["hlm", "o#s", "rtu"])).unwrap();
        grid
    }

    // Tests placement bookkeeping
    #[test]
    fn test_insert_and_lookup() {
        let grid = two_by_two();
        assert_eq!(grid.side(), 2);
        assert_eq!(grid.placed_count(), 4);
        assert!(grid.is_complete());
        assert!(grid.is_placed(1, 0));
        assert_eq!(grid.get(1, 0).map(PlacedTile::id), Some(2));
        assert_eq!(grid.get(0, 1).map(PlacedTile::id), Some(3));
        assert!(grid.get(2, 0).is_none());
    }

    // Tests that a cell cannot be filled twice or outside the grid
    #[test]
    fn test_insert_rejects_conflicts() {
        let mut grid = PlacementGrid::new(2);
        grid.insert(0, 0, placed(1, &["abc", "def", "ghi"])).unwrap();

        let occupied = grid.insert(0, 0, placed(2, &["abc", "def", "ghi"]));
        assert!(matches!(occupied, Err(PuzzleError::MalformedPuzzle { .. })));

        let outside = grid.insert(2, 0, placed(3, &["abc", "def", "ghi"]));
        assert!(matches!(outside, Err(PuzzleError::MalformedPuzzle { .. })));
        assert_eq!(grid.placed_count(), 1);
        assert!(!grid.is_complete());
    }

    // Tests that the layout is indexed by row then column
    #[test]
    fn test_layout() {
        let layout = two_by_two().layout();
        assert_eq!(layout, array![[Some(1), Some(2)], [Some(3), Some(4)]]);

        let empty = PlacementGrid::new(2).layout();
        assert!(empty.iter().all(Option::is_none));
    }

    // Tests seam verification on matching and mismatching neighbours
    #[test]
    fn test_verify_seams() {
        assert!(two_by_two().verify_seams().is_ok());

        let mut grid = PlacementGrid::new(2);
        grid.insert(0, 0, placed(1, &["abc", "d#e", "fgh"])).unwrap();
        grid.insert(1, 0, placed(2, &["xij", "e.k", "hlm"])).unwrap();
        assert!(matches!(
            grid.verify_seams(),
            Err(PuzzleError::MalformedPuzzle { .. })
        ));
    }

    // Tests that stitching keeps only interiors in row-major order
    #[test]
    fn test_stitch() {
        let image = two_by_two().stitch().unwrap();
        assert_eq!(image, AssembledImage::from_rows(&["#.", ".#"]).unwrap());
        assert_eq!(image.side(), 2);
        assert_eq!(image.active_count(), 2);
    }

    // Tests that an incomplete grid cannot be stitched
    #[test]
    fn test_stitch_incomplete() {
        let mut grid = PlacementGrid::new(2);
        grid.insert(0, 0, placed(1, &["abc", "def", "ghi"])).unwrap();
        assert!(matches!(
            grid.stitch(),
            Err(PuzzleError::MalformedPuzzle { .. })
        ));
        assert!(PlacementGrid::new(1).stitch().is_err());
    }

    // Tests image construction, orientation and display
    #[test]
    fn test_assembled_image() {
        let image = AssembledImage::from_rows(&["#..", "...", "..."]).unwrap();
        assert_eq!(image.active_count(), 1);
        assert_eq!(image.pixels().get((0, 0)), Some(&Pixel::ACTIVE));

        let rotated = image.oriented(Orientation::ROTATE_90);
        assert_eq!(rotated.pixels().get((0, 2)), Some(&Pixel::ACTIVE));
        assert_eq!(rotated.active_count(), 1);
        assert_eq!(image.orientations().count(), 8);
        assert_eq!(image.to_string(), "#..\n...\n...\n");

        assert!(AssembledImage::from_rows(&["#.", "#"]).is_err());
    }
}
