//! Cardinal directions and edge indexing
//!
//! Edges of a tile are stored clockwise starting at north, so a direction's
//! discriminant doubles as its edge index and a clockwise quarter turn adds one.

use std::fmt;

/// One of the four cardinal directions on the grid
///
/// North points towards decreasing `y`, east towards increasing `x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Towards row `y - 1`
    North = 0,
    /// Towards column `x + 1`
    East = 1,
    /// Towards row `y + 1`
    South = 2,
    /// Towards column `x - 1`
    West = 3,
}

impl Direction {
    /// All directions in edge order
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Edge index of this direction (north = 0, clockwise)
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction for an edge index, wrapping modulo four
    pub const fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Self::North,
            1 => Self::East,
            2 => Self::South,
            _ => Self::West,
        }
    }

    /// The direction pointing the other way
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Rotate clockwise by the given number of quarter turns
    pub const fn rotated_clockwise(self, quarter_turns: usize) -> Self {
        Self::from_index(self.index() + quarter_turns)
    }

    /// Offset `(dx, dy)` of the neighbouring cell in this direction
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        };
        f.write_str(name)
    }
}
