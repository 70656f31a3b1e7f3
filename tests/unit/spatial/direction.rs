//! Tests for cardinal directions, rotation and neighbour offsets

#[cfg(test)]
mod tests {
    use tileforge::spatial::direction::Direction;

    // Tests opposites pair up and are involutive
    // Verified by offsetting opposite by one instead of two
    #[test]
    fn test_opposite() {
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::East.opposite(), Direction::West);
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    // Tests clockwise rotation wraps after four quarter turns
    #[test]
    fn test_rotated_clockwise() {
        assert_eq!(Direction::North.rotated_clockwise(1), Direction::East);
        assert_eq!(Direction::West.rotated_clockwise(1), Direction::North);
        assert_eq!(Direction::South.rotated_clockwise(4), Direction::South);
        assert_eq!(Direction::from_index(7), Direction::West);
    }

    // Tests offsets point north to decreasing y
    // Verified by flipping the vertical axis
    #[test]
    fn test_offsets_cancel_with_opposite() {
        assert_eq!(Direction::North.offset(), (0, -1));
        assert_eq!(Direction::East.offset(), (1, 0));
        for direction in Direction::ALL {
            let (dx, dy) = direction.offset();
            let (ox, oy) = direction.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    // Tests edge indices follow clockwise order from north
    #[test]
    fn test_index_order() {
        let indices: Vec<usize> = Direction::ALL.iter().map(|d| d.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(Direction::South.to_string(), "south");
    }
}
