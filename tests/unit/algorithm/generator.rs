//! Tests for seeded puzzle generation

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use tilestitch::PuzzleError;
    use tilestitch::algorithm::borders::BorderIndex;
    use tilestitch::algorithm::generator::PuzzleGenerator;
    use tilestitch::analysis::patterns::ReferencePattern;
    use tilestitch::io::configuration::{MAX_TILE_ID, MIN_TILE_ID};
    use tilestitch::io::parse::parse_tiles;

    // Tests tile count, tile size and image size
    #[test]
    fn test_generate_shapes() {
        let puzzle = PuzzleGenerator::new(3)
            .with_tile_side(8)
            .generate()
            .unwrap();

        assert_eq!(puzzle.tiles.len(), 9);
        assert!(puzzle.tiles.iter().all(|tile| tile.side() == 8));
        assert_eq!(puzzle.layout.dim(), (3, 3));
        assert_eq!(puzzle.image.side(), 18);
    }

    // Tests that the same seed reproduces the same puzzle
    #[test]
    fn test_generate_deterministic() {
        let first = PuzzleGenerator::new(3).with_seed(11).generate().unwrap();
        let second = PuzzleGenerator::new(3).with_seed(11).generate().unwrap();
        let other = PuzzleGenerator::new(3).with_seed(12).generate().unwrap();

        assert_eq!(first.tiles, second.tiles);
        assert_eq!(first.layout, second.layout);
        assert_ne!(first.tiles, other.tiles);
    }

    // Tests that ids are unique four-digit numbers matching the layout
    #[test]
    fn test_generate_ids() {
        let puzzle = PuzzleGenerator::new(4).generate().unwrap();
        let ids: HashSet<u64> = puzzle.tiles.iter().map(|tile| tile.id()).collect();
        let layout_ids: HashSet<u64> = puzzle.layout.iter().copied().collect();

        assert_eq!(ids.len(), 16);
        assert_eq!(ids, layout_ids);
        assert!(ids.iter().all(|id| (MIN_TILE_ID..MAX_TILE_ID).contains(id)));
    }

    // Tests that every border signature belongs to one or two tiles
    #[test]
    fn test_generate_well_formed_borders() {
        let puzzle = PuzzleGenerator::new(4).with_seed(3).generate().unwrap();
        let index = BorderIndex::build(&puzzle.tiles).unwrap();

        let corners: HashSet<u64> = index
            .find_corner_tiles(&puzzle.tiles)
            .unwrap()
            .into_iter()
            .collect();
        let expected: HashSet<u64> = puzzle.corner_ids().into_iter().collect();
        assert_eq!(corners, expected);

        for tile in &puzzle.tiles {
            for border in tile.borders() {
                assert!(!border.is_palindrome());
                let owners = index.tiles_with(&border).len();
                assert!(owners == 1 || owners == 2);
            }
        }
    }

    // Tests that planted patterns are present in an otherwise empty image
    #[test]
    fn test_generate_planted_pattern() {
        let pattern = ReferencePattern::sea_monster().unwrap();
        let puzzle = PuzzleGenerator::new(3)
            .with_density(0.0)
            .with_pattern(pattern.clone(), 1)
            .generate()
            .unwrap();

        assert_eq!(puzzle.image.active_count(), pattern.active_cells());
        assert_eq!(pattern.find_matches(&puzzle.image.view()).len(), 1);
    }

    // Tests that the text form parses back to the same tiles
    #[test]
    fn test_to_text_round_trip() {
        let puzzle = PuzzleGenerator::new(2).with_tile_side(8).generate().unwrap();
        let text = puzzle.to_text();
        assert_eq!(text.matches("Tile ").count(), puzzle.tiles.len());
        assert!(text.ends_with("\n\n"));

        let parsed = parse_tiles(&text).unwrap();
        assert_eq!(parsed, puzzle.tiles);
    }

    // Tests rejection of unusable settings
    #[test]
    fn test_generate_invalid_parameters() {
        let cases = [
            PuzzleGenerator::new(1),
            PuzzleGenerator::new(3).with_tile_side(2),
            PuzzleGenerator::new(3).with_density(1.5),
            PuzzleGenerator::new(3).with_border_alphabet(&[]),
            PuzzleGenerator::new(3).with_border_alphabet(&['#', ' ']),
            PuzzleGenerator::new(3)
                .with_tile_side(4)
                .with_pattern(ReferencePattern::sea_monster().unwrap(), 1),
        ];
        for generator in cases {
            assert!(
                matches!(
                    generator.generate(),
                    Err(PuzzleError::InvalidParameter { .. })
                ),
                "{generator:?}"
            );
        }
    }

    // Tests that three-pixel tiles are refused up front whatever the alphabet
    #[test]
    fn test_generate_rejects_single_middle_cell() {
        let result = PuzzleGenerator::new(3)
            .with_tile_side(3)
            .with_border_alphabet(&['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'])
            .generate();
        assert!(matches!(
            result,
            Err(PuzzleError::InvalidParameter {
                parameter: "tile_side",
                ..
            })
        ));
    }

    // Tests that a single-symbol alphabet cannot produce distinct borders
    #[test]
    fn test_generate_alphabet_too_small() {
        let result = PuzzleGenerator::new(2)
            .with_border_alphabet(&['#'])
            .generate();
        assert!(matches!(result, Err(PuzzleError::InvalidParameter { .. })));
    }

    // Tests that a larger alphabet keeps short borders distinct
    #[test]
    fn test_generate_small_tiles() {
        let puzzle = PuzzleGenerator::new(3)
            .with_tile_side(4)
            .with_border_alphabet(&['A', 'B', 'C', 'D'])
            .generate()
            .unwrap();
        assert_eq!(puzzle.image.side(), 6);
        assert!(BorderIndex::build(&puzzle.tiles).is_ok());
    }
}
