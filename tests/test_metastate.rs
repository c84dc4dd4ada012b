use std::collections::HashSet;

use ur_solver::metastate::{self, SafeCounts};
use ur_solver::rules::PIECE_COUNT;

#[test]
fn test_thirty_six_metastates() {
    let all = SafeCounts::all();
    assert_eq!(all.len(), 36);

    let mut seen = HashSet::new();
    for state in &all {
        assert!(state.hi() >= state.lo());
        assert!(state.hi() <= PIECE_COUNT);
        assert!(seen.insert((state.hi(), state.lo())));
    }
}

#[test]
fn test_ordering_by_total_then_hi() {
    assert!(SafeCounts::new(3, 0) < SafeCounts::new(2, 2));
    assert!(SafeCounts::new(4, 0) > SafeCounts::new(2, 1));
    assert!(SafeCounts::new(3, 1) > SafeCounts::new(2, 2));
    assert_eq!(SafeCounts::new(5, 2), SafeCounts::new(5, 2));
}

#[test]
fn test_solve_order_runs_from_endgame_to_opening() {
    let order = metastate::solve_order();
    assert_eq!(order.len(), 36);
    assert_eq!(order[0], SafeCounts::new(PIECE_COUNT, PIECE_COUNT));
    assert_eq!(order[35], SafeCounts::new(0, 0));
    assert!(order.windows(2).all(|w| w[0] > w[1]));
}

#[test]
fn test_fully_safe_endgame_has_nine_positions() {
    // Each side can hold spaces 12, 13, or both; terminal sides are
    // excluded, and the private lanes never collide.
    let positions = SafeCounts::new(PIECE_COUNT, PIECE_COUNT).positions();
    assert_eq!(positions.len(), 9);
    for pos in &positions {
        assert!(pos.is_valid());
        assert!(!pos.is_terminal());
        assert_eq!(SafeCounts::of(*pos), SafeCounts::new(7, 7));
    }
}

#[test]
fn test_asymmetric_states_include_both_orientations() {
    let state = SafeCounts::new(7, 6);
    let positions = state.positions();
    assert!(!positions.is_empty());
    assert!(positions
        .iter()
        .any(|p| p.attacker().safe_count() > p.defender().safe_count()));
    assert!(positions
        .iter()
        .any(|p| p.attacker().safe_count() < p.defender().safe_count()));
}

#[test]
fn test_positions_partition_is_disjoint() {
    // A position's metastate is unique, so two different metastates can
    // never enumerate the same position.
    let a: HashSet<i32> = SafeCounts::new(7, 7)
        .positions()
        .iter()
        .map(|p| p.id())
        .collect();
    let b: HashSet<i32> = SafeCounts::new(7, 6)
        .positions()
        .iter()
        .map(|p| p.id())
        .collect();
    assert!(a.is_disjoint(&b));
}
