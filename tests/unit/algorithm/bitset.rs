//! Tests for `TileBitset` membership, removal and set operations

#[cfg(test)]
mod tests {
    use tileforge::algorithm::bitset::TileBitset;

    // Verifies new TileBitset is empty with count 0
    // Verified by initializing bitset with all bits set to 1
    #[test]
    fn test_new_bitset() {
        let bitset = TileBitset::new(10);
        assert_eq!(bitset.count(), 0);
        assert!(bitset.is_empty());
        assert_eq!(bitset.capacity(), 10);
    }

    // Tests insertion reports change only once and ignores out of range indices
    // Verified by dropping the containment check in insert
    #[test]
    fn test_insert_and_contains() {
        let mut bitset = TileBitset::new(10);
        assert!(bitset.insert(5));
        assert!(!bitset.insert(5));
        assert!(!bitset.insert(10));
        assert!(bitset.contains(5));
        assert!(!bitset.contains(3));
        assert!(!bitset.contains(10));
        assert_eq!(bitset.count(), 1);
    }

    // Tests removal reports whether the set changed
    // Verified by always returning true from remove
    #[test]
    fn test_remove() {
        let mut bitset = TileBitset::all(4);
        assert!(bitset.remove(0));
        assert!(!bitset.remove(0));
        assert!(!bitset.remove(99));
        assert_eq!(bitset.to_vec(), vec![1, 2, 3]);
        assert_eq!(bitset.first(), Some(1));
    }

    // Tests intersection and union of two bitsets
    // Verified by swapping the intersection and union operators
    #[test]
    fn test_intersection_and_union() {
        let set1 = TileBitset::from_indices(&[0, 2, 4], 8);
        let set2 = TileBitset::from_indices(&[2, 4, 6], 8);

        assert_eq!(set1.intersection(&set2).to_vec(), vec![2, 4]);

        let mut union = set1.clone();
        union.union_with(&set2);
        assert_eq!(union.to_vec(), vec![0, 2, 4, 6]);
    }

    // Tests counting members missing from another set, the LCV elimination count
    // Verified by counting members inside the other set instead
    #[test]
    fn test_count_outside() {
        let domain = TileBitset::all(5);
        let allowed = TileBitset::from_indices(&[1, 3], 5);
        assert_eq!(domain.count_outside(&allowed), 3);
        assert_eq!(allowed.count_outside(&domain), 0);
    }

    // Tests equality is by content, which domain snapshots rely on
    #[test]
    fn test_equality_by_content() {
        let mut a = TileBitset::all(3);
        let b = TileBitset::all(3);
        assert_eq!(a, b);
        a.remove(1);
        assert_ne!(a, b);
        a.insert(1);
        assert_eq!(a, b);
    }
}
