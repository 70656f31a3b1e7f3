//! Tests for PNG layout previews including palette fallback and error handling

#[cfg(test)]
mod tests {
    use tileforge::ForgeError;
    use tileforge::io::image::{export_layout_as_png, tile_palette};
    use tileforge::spatial::layout::{SolvedGrid, TileAssignment};
    use tileforge::spatial::tiles::{TileCatalog, TileType};

    fn two_tiles() -> TileCatalog {
        TileCatalog::new(vec![
            TileType::symmetric(0, "a").with_color([200, 100, 50]),
            TileType::symmetric(1, "b"),
        ])
        .unwrap()
    }

    fn layout(cells: &[(u32, usize)]) -> SolvedGrid {
        let cells = cells
            .iter()
            .map(|&(tile_id, rotation)| TileAssignment { tile_id, rotation })
            .collect();
        SolvedGrid::new(2, 1, cells).unwrap()
    }

    // Tests explicit colours win and missing ones are generated
    #[test]
    fn test_palette() {
        let palette = tile_palette(&two_tiles());
        assert_eq!(palette.get(&0), Some(&[200, 100, 50]));
        assert!(palette.contains_key(&1));
        assert_eq!(tile_palette(&two_tiles()), palette);
    }

    // Tests PNG file creation with one square per cell
    // Verified by disabling file save operation
    #[test]
    fn test_export_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview").join("layout.png");

        export_layout_as_png(&layout(&[(0, 0), (1, 0)]), &two_tiles(), 3, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (6, 3));
        assert_eq!(img.get_pixel(1, 1).0, [200, 100, 50]);
    }

    // Tests rotated tiles get a darker corner marker
    // Verified by drawing the marker for every rotation
    #[test]
    fn test_rotation_marker() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rotated.png");

        export_layout_as_png(&layout(&[(0, 0), (0, 2)]), &two_tiles(), 2, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.get_pixel(0, 0).0, [200, 100, 50]);
        assert_eq!(img.get_pixel(2, 0).0, [100, 50, 25]);
        assert_eq!(img.get_pixel(3, 1).0, [200, 100, 50]);
    }

    // Tests zero cell size and unknown tiles are rejected
    #[test]
    fn test_export_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never.png");

        let err = export_layout_as_png(&layout(&[(0, 0), (1, 0)]), &two_tiles(), 0, &path)
            .unwrap_err();
        assert!(err.is_config_error());

        let err = export_layout_as_png(&layout(&[(0, 0), (5, 0)]), &two_tiles(), 1, &path)
            .unwrap_err();
        assert!(matches!(err, ForgeError::InvalidTileIndex { index: 5, .. }));
        assert!(!path.exists());
    }

    // Tests a cell size whose image extent overflows is rejected before drawing
    // Verified by multiplying the extent unchecked
    #[test]
    fn test_export_oversized_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.png");
        let wide = SolvedGrid::new(
            3,
            1,
            vec![
                TileAssignment {
                    tile_id: 0,
                    rotation: 0,
                };
                3
            ],
        )
        .unwrap();

        let err = export_layout_as_png(&wide, &two_tiles(), 2_000_000_000, &path).unwrap_err();
        assert!(matches!(
            err,
            ForgeError::InvalidParameter {
                parameter: "cell_pixels",
                ..
            }
        ));
        assert!(!path.exists());
    }
}
