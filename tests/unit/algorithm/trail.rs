//! Tests for trail frames and exact undo of grid changes

#[cfg(test)]
mod tests {
    use tileforge::algorithm::trail::{Trail, TrailEntry};
    use tileforge::spatial::GridState;

    // Tests a rewound frame restores domains, assignments and the collapse count
    // Verified by skipping the Collapsed entry on revert
    #[test]
    fn test_rewind_restores_grid() {
        let mut grid = GridState::new(2, 2, 3);
        let mut trail = Trail::new();
        let before = grid.clone();

        trail.checkpoint();
        grid.assign(0, 1, &mut trail).unwrap();
        grid.remove_from_domain(1, 2, &mut trail).unwrap();
        assert_ne!(grid, before);
        assert_eq!(grid.collapsed_count(), 1);

        assert!(trail.rewind(&mut grid));
        assert_eq!(grid, before);
        assert_eq!(trail.depth(), 0);
        assert!(trail.is_empty());
    }

    // Tests undo_frame keeps the frame open for the next candidate
    #[test]
    fn test_undo_frame_keeps_frame() {
        let mut grid = GridState::new(1, 2, 2);
        let mut trail = Trail::new();

        trail.checkpoint();
        grid.assign(0, 0, &mut trail).unwrap();
        // One removal plus the collapse
        assert_eq!(trail.undo_frame(&mut grid), 2);
        assert_eq!(trail.depth(), 1);

        grid.assign(0, 1, &mut trail).unwrap();
        assert_eq!(
            trail.frame_entries(),
            &[
                TrailEntry::Removed {
                    cell: 0,
                    variant: 0
                },
                TrailEntry::Collapsed { cell: 0 },
            ]
        );
    }

    // Tests nested frames unwind independently
    // Verified by rewinding to the first checkpoint instead of the last
    #[test]
    fn test_nested_frames() {
        let mut grid = GridState::new(3, 1, 2);
        let mut trail = Trail::new();

        assert_eq!(trail.checkpoint(), 0);
        grid.assign(0, 0, &mut trail).unwrap();
        let after_first = grid.clone();

        assert_eq!(trail.checkpoint(), trail.len());
        grid.assign(1, 1, &mut trail).unwrap();
        grid.remove_from_domain(2, 0, &mut trail).unwrap();

        assert!(trail.rewind(&mut grid));
        assert_eq!(grid, after_first);
        assert_eq!(trail.depth(), 1);

        assert!(trail.rewind(&mut grid));
        assert_eq!(grid, GridState::new(3, 1, 2));
        assert!(!trail.rewind(&mut grid));
    }

    // Tests popping a frame merges its entries into the parent frame
    #[test]
    fn test_pop_frame_merges_into_parent() {
        let mut grid = GridState::new(2, 1, 2);
        let mut trail = Trail::new();

        trail.checkpoint();
        grid.assign(0, 0, &mut trail).unwrap();
        trail.checkpoint();
        grid.assign(1, 0, &mut trail).unwrap();

        assert!(trail.pop_frame());
        assert_eq!(trail.frame_entries().len(), 4);
        trail.undo_frame(&mut grid);
        assert_eq!(grid, GridState::new(2, 1, 2));
        assert!(trail.pop_frame());
        assert!(!trail.pop_frame());
    }
}
