use std::fs;
use std::path::PathBuf;

use ur_solver::analyzer::PositionAnalyzer;
use ur_solver::graph::ChunkGraph;
use ur_solver::player::{Move, PlayerPosition};
use ur_solver::position::GamePosition;
use ur_solver::solver::CONVERGENCE_THRESHOLD;
use ur_solver::table::ValueTable;
use ur_solver::values::{PositionValue, PositionValues};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("ur-solver-test-{}-{}", std::process::id(), name))
}

fn sample_values() -> PositionValues {
    let mut entries: Vec<PositionValue> = [(-5, 0.25f32), (0, 0.5), (17, 0.875), (90210, 1.0)]
        .iter()
        .map(|&(id, value)| PositionValue { id, value })
        .collect();
    entries.sort_by_key(|e| e.id);
    PositionValues::new(entries)
}

#[test]
fn test_save_load_roundtrip() {
    let path = temp_path("roundtrip.dat");
    let values = sample_values();
    values.save(&path).unwrap();

    let loaded = PositionValues::load(&path).unwrap();
    assert_eq!(loaded.len(), values.len());
    for (a, b) in loaded.entries().iter().zip(values.entries()) {
        assert_eq!(a, b);
    }
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_load_rejects_truncated_file() {
    let path = temp_path("truncated.dat");
    fs::write(&path, [0u8; 13]).unwrap();
    assert!(PositionValues::load(&path).is_err());
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_load_rejects_unsorted_records() {
    let path = temp_path("unsorted.dat");
    let mut bytes = Vec::new();
    for id in [9i32, 3] {
        bytes.extend_from_slice(&id.to_le_bytes());
        bytes.extend_from_slice(&0.5f32.to_le_bytes());
    }
    fs::write(&path, bytes).unwrap();
    assert!(PositionValues::load(&path).is_err());
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_get_by_id() {
    let values = sample_values();
    assert_eq!(values.get(17), Some(0.875));
    assert_eq!(values.get(18), None);
}

/// Solve the closed one-piece endgame and check the analyzer against it.
fn solved_endgame() -> PositionValues {
    let boards = [0u16, 1 << 12, 1 << 13, (1 << 12) | (1 << 13)];
    let mut universe = Vec::new();
    for &a in &boards {
        for &d in &boards {
            universe.push(GamePosition::new(
                PlayerPosition::new(a, 0),
                PlayerPosition::new(d, 0),
            ));
        }
    }
    let live: Vec<GamePosition> = universe
        .iter()
        .copied()
        .filter(|p| !p.is_terminal())
        .collect();

    let mut table = ValueTable::with_positions(&universe);
    let graph = ChunkGraph::build(&live, &table);
    loop {
        let delta = graph.sweep(&table);
        table.toggle();
        if delta <= CONVERGENCE_THRESHOLD {
            break;
        }
    }
    table.into_values()
}

#[test]
fn test_analyzer_prefers_the_winning_exit() {
    let values = solved_endgame();

    // One piece on 13 for each side; rolling 1 exits and wins on the spot.
    let position = GamePosition::new(
        PlayerPosition::new(1 << 13, 0),
        PlayerPosition::new(1 << 13, 0),
    );
    let moves = values.analyze(position, 1);
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].mv, Move::new(13, 14));
    assert_eq!(moves[0].value, 1.0);
    assert_eq!(values.best_move(position, 1), Some(Move::new(13, 14)));
}

#[test]
fn test_analyzer_skips_blocked_moves() {
    let values = solved_endgame();

    // Both pieces on 12 and 13: a roll of 1 can only exit from 13 (12 is
    // blocked by the mover's own piece), so the single move wins nothing
    // outright but stays legal; a roll of 2 exits from 12.
    let position = GamePosition::new(
        PlayerPosition::new((1 << 12) | (1 << 13), 0),
        PlayerPosition::new(1 << 13, 0),
    );
    let roll_one = values.analyze(position, 1);
    assert_eq!(roll_one.len(), 1);
    assert_eq!(roll_one[0].mv, Move::new(13, 14));

    let roll_two = values.analyze(position, 2);
    assert_eq!(roll_two.len(), 1);
    assert_eq!(roll_two[0].mv, Move::new(12, 14));
}

#[test]
fn test_policy_indexes_the_best_move() {
    let values = solved_endgame();
    let position = GamePosition::new(
        PlayerPosition::new(1 << 13, 0),
        PlayerPosition::new(1 << 13, 0),
    );
    // Rolls 2-4 have no move, so their policy entries stay 0; roll 1 has
    // exactly one move, also index 0.
    assert_eq!(values.policy(position), [0, 0, 0, 0]);
}
