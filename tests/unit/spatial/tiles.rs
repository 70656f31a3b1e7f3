//! Tests for connector labels, edge rotation and catalog validation

#[cfg(test)]
mod tests {
    use tileforge::ForgeError;
    use tileforge::spatial::direction::Direction;
    use tileforge::spatial::tiles::{ConnectorLabel, EdgeLabels, TileCatalog, TileType};

    // Tests label sets split on the separator and ignore blanks
    #[test]
    fn test_label_symbols() {
        let label = ConnectorLabel::from(" sand | water ||");
        assert_eq!(label.symbols().collect::<Vec<_>>(), vec!["sand", "water"]);
        assert_eq!(ConnectorLabel::from("rock").symbols().count(), 1);
    }

    // Tests a quarter turn moves the north edge to the east
    // Verified by rotating counter-clockwise
    #[test]
    fn test_edge_rotation() {
        let edges = EdgeLabels::new("n", "e", "s", "w");
        let turned = edges.rotated_clockwise(1);
        assert_eq!(turned, EdgeLabels::new("w", "n", "e", "s"));
        assert_eq!(edges.rotated_clockwise(4), edges);
        assert_eq!(
            edges.rotated_clockwise(2).edge(Direction::North).as_str(),
            "s"
        );
    }

    // Tests duplicate turns collapse to one rotation
    #[test]
    fn test_with_turns_dedup() {
        let tile = TileType::with_turns(1, &EdgeLabels::uniform("x"), &[0, 4, 1, 5]);
        assert_eq!(tile.rotation_count(), 2);
        assert_eq!(tile.id(), 1);
    }

    // Tests variants are ordered by tile ID then rotation
    // Verified by ordering variants by insertion order
    #[test]
    fn test_variant_order() {
        let catalog = TileCatalog::new(vec![
            TileType::with_turns(5, &EdgeLabels::new("a", "b", "a", "b"), &[0, 1]),
            TileType::symmetric(1, "a").named("plain"),
        ])
        .unwrap();

        assert_eq!(catalog.variant_count(), 3);
        assert_eq!(catalog.variant_tile_id(0), Some(1));
        assert_eq!(catalog.variant_tile_id(2), Some(5));
        assert_eq!(catalog.variant_index(5, 1), Some(2));
        assert_eq!(catalog.variant_index(5, 2), None);
        assert_eq!(catalog.tile_index(1), Some(1));
        assert_eq!(catalog.tile(1).and_then(TileType::name), Some("plain"));

        let labels: Vec<&str> = catalog.labels().into_iter().map(ConnectorLabel::as_str).collect();
        assert_eq!(labels, vec!["a", "b"]);
    }

    // Tests malformed catalogs are rejected
    #[test]
    fn test_catalog_validation() {
        let invalid = [
            Vec::new(),
            vec![TileType::symmetric(1, "a"), TileType::symmetric(1, "b")],
            vec![TileType::new(2, Vec::new())],
            vec![TileType::new(3, vec![EdgeLabels::new("a", " ", "a", "a")])],
        ];
        for tiles in invalid {
            assert!(matches!(
                TileCatalog::new(tiles),
                Err(ForgeError::InvalidCatalog { .. })
            ));
        }
    }

    // Tests the variant limit is enforced
    #[test]
    fn test_variant_limit() {
        let tiles: Vec<TileType> = (0..1025)
            .map(|id| TileType::with_turns(id, &EdgeLabels::uniform("a"), &[0, 1, 2, 3]))
            .collect();
        assert!(TileCatalog::new(tiles).is_err());
    }
}
