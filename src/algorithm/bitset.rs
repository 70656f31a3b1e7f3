use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over tile variant indices
///
/// Serves both as a cell domain and as a compatibility row. Uses 0-based
/// indexing so variant indices address bits directly.
/// Provides O(1) membership testing, insertion and removal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
    max_tiles: usize,
}

impl TileBitset {
    /// Create a bitset with no tiles present
    pub fn new(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![0; max_tiles],
            max_tiles,
        }
    }

    /// Create a bitset containing all possible tiles
    pub fn all(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![1; max_tiles],
            max_tiles,
        }
    }

    /// Capacity the bitset was created with
    pub const fn capacity(&self) -> usize {
        self.max_tiles
    }

    /// Insert a tile index
    ///
    /// Returns whether the set changed. Out of range indices are ignored.
    pub fn insert(&mut self, tile: usize) -> bool {
        if tile < self.max_tiles && !self.contains(tile) {
            self.bits.set(tile, true);
            true
        } else {
            false
        }
    }

    /// Remove a tile index
    ///
    /// Returns whether the set changed
    pub fn remove(&mut self, tile: usize) -> bool {
        if self.contains(tile) {
            self.bits.set(tile, false);
            true
        } else {
            false
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Intersect this bitset with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Union this bitset with another in-place
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Create a new bitset containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Count members of this set that are absent from `other`
    pub fn count_outside(&self, other: &Self) -> usize {
        self.iter().filter(|&tile| !other.contains(tile)).count()
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate over present tile indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Lowest present tile index
    pub fn first(&self) -> Option<usize> {
        self.bits.first_one()
    }

    /// Extract all tile indices as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }

    /// Build a bitset from a list of indices
    pub fn from_indices(indices: &[usize], max_tiles: usize) -> Self {
        let mut bitset = Self::new(max_tiles);
        for &tile in indices {
            bitset.insert(tile);
        }
        bitset
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileBitset({} tiles: {:?})", self.count(), self.to_vec())
    }
}
