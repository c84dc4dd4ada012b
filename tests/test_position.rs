use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ur_solver::metastate::SafeCounts;
use ur_solver::notation::parse_game;
use ur_solver::player::Move;
use ur_solver::position::GamePosition;

/// Play random moves from the start, visiting each position along the way.
fn random_playout(seed: u64, mut visit: impl FnMut(GamePosition)) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos = GamePosition::default();
    while !pos.is_terminal() {
        visit(pos);
        let roll = rng.gen_range(0usize..=4);
        let moves = pos.moves(roll);
        if moves.is_empty() {
            pos = pos.reversed();
        } else {
            pos.apply(moves[rng.gen_range(0..moves.len())]);
        }
    }
    visit(pos);
}

#[test]
fn test_known_id_bit_pattern() {
    let pos = parse_game("3/4 X--X/-O-- X------- XX/--").unwrap();
    assert_eq!(pos.id(), 0b111001_011_0000000000010_000010_100);
}

#[test]
fn test_id_roundtrip_along_playouts() {
    for seed in 0..20 {
        random_playout(seed, |pos| {
            assert!(pos.is_valid());
            assert_eq!(GamePosition::from_id(pos.id()), pos);
        });
    }
}

#[test]
fn test_reversed_swaps_sides() {
    let pos = parse_game("3/4 X--X/-O-- X--O---- XX/--").unwrap();
    let rev = pos.reversed();
    assert_eq!(rev.attacker(), pos.defender());
    assert_eq!(rev.defender(), pos.attacker());
    assert_eq!(rev.reversed(), pos);
}

#[test]
fn test_capture_is_the_only_move() {
    // Attacker on the sanctuary, defender one ahead: rolling 1 must
    // capture, and the defender's piece returns to its pool.
    let pos = parse_game("0/0 ----/---- ---XO--- --/--").unwrap();
    let moves = pos.moves(1);
    assert_eq!(moves, vec![Move::new(7, 8)]);

    let (next, passes) = pos.with_move(moves[0]);
    assert!(passes);
    // The board flipped, so the captured side is now the attacker.
    assert_eq!(next.attacker().wait_count(), 1);
    assert_eq!(next.attacker().board_count(), 0);
    assert!(next.defender().occupies(8));
}

#[test]
fn test_sanctuary_blocks_capture() {
    // Defender holds the sanctuary; the attacker's piece on 5 can't land
    // there with a roll of 2.
    let pos = parse_game("0/0 ----/---- -X-O---- --/--").unwrap();
    assert!(pos.moves(2).is_empty());
}

#[test]
fn test_entry_is_the_only_move() {
    // Board moves are blocked by own and sanctuary pieces; only the pool
    // can move.
    let pos = parse_game("1/0 ---X/---- -X-O---- --/--").unwrap();
    assert_eq!(pos.moves(2), vec![Move::enter(1)]);
}

#[test]
fn test_exit_requires_exact_count() {
    let pos = parse_game("0/7 ----/---- -------- X-/--").unwrap();
    assert_eq!(pos.moves(2), vec![Move::new(12, 14)]);
    // Overshooting rolls can't move the piece at all.
    assert!(pos.moves(3).is_empty());
    assert!(pos.moves(4).is_empty());
}

#[test]
fn test_rosette_keeps_the_turn() {
    let mut pos = GamePosition::default();
    let attacker_before = pos.attacker();
    let passes = pos.apply(Move::enter(3));
    assert!(!passes);
    assert!(pos.attacker().occupies(3));
    assert_eq!(pos.attacker().wait_count(), attacker_before.wait_count() - 1);
}

#[test]
fn test_safe_counts_never_decrease() {
    for seed in 20..30 {
        let mut prev: Option<SafeCounts> = None;
        random_playout(seed, |pos| {
            let state = SafeCounts::of(pos);
            if let Some(prev) = prev {
                assert!(state >= prev, "metastate went backwards: {prev} to {state}");
            }
            prev = Some(state);
        });
    }
}
