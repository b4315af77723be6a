//! Tests for the grow-only set of consumed edge slots

#[cfg(test)]
mod tests {
    use jigsolve::algorithm::exclusion::{EdgeRef, ExclusionSet};
    use jigsolve::puzzle::piece::PieceId;

    fn slot(piece: usize, edge: u8) -> EdgeRef {
        EdgeRef::new(PieceId(piece), edge)
    }

    // Tests membership after insertion and rejection of duplicates
    // Verified by counting duplicate inserts
    #[test]
    fn test_insert_and_contains() {
        let mut without = ExclusionSet::new(3);
        assert!(without.is_empty());

        assert!(without.insert(slot(1, 2)));
        assert!(!without.insert(slot(1, 2)));
        assert!(without.contains(slot(1, 2)));
        assert!(!without.contains(slot(1, 3)));
        assert!(!without.contains(slot(2, 2)));
        assert_eq!(without.len(), 1);
    }

    // Tests edge indices outside 0..4 are never stored
    // Verified by removing the range check
    #[test]
    fn test_out_of_range_edge() {
        let mut without = ExclusionSet::new(2);
        assert!(!without.insert(slot(0, 4)));
        assert!(!without.contains(slot(0, 4)));
        assert!(!without.contains(slot(1, 0)));
        assert!(without.is_empty());
    }

    // Tests pieces beyond the initial capacity grow the set
    // Verified by ignoring inserts past the end
    #[test]
    fn test_growth() {
        let mut without = ExclusionSet::new(1);
        assert!(without.insert(slot(5, 3)));
        assert!(without.contains(slot(5, 3)));
        assert!(!without.contains(slot(4, 3)));
        assert!(!without.contains(slot(9, 0)));
    }

    // Tests open edges and ordered iteration over consumed slots
    // Verified by iterating in insertion order
    #[test]
    fn test_open_edges_and_iter() {
        let mut without = ExclusionSet::new(3);
        for s in [slot(2, 0), slot(0, 3), slot(0, 1)] {
            without.insert(s);
        }

        assert_eq!(without.open_edges(PieceId(0)).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(without.open_edges(PieceId(1)).count(), 4);
        assert_eq!(
            without.iter().collect::<Vec<_>>(),
            vec![slot(0, 1), slot(0, 3), slot(2, 0)]
        );
        assert_eq!(without.to_string(), "{#0:1, #0:3, #2:0}");
    }

    // Tests a set grown by inserts still holds every earlier slot
    // Verified by clearing bits when the set grows
    #[test]
    fn test_growth_keeps_slots() {
        let mut without = ExclusionSet::new(2);
        without.insert(slot(0, 0));
        let before = without.clone();
        without.insert(slot(1, 1));
        without.insert(slot(4, 2));

        assert!(before.iter().all(|s| without.contains(s)));
        assert!(!before.contains(slot(1, 1)));
        assert_eq!(without.len(), 3);
    }
}
