//! Move evaluation on top of a solved value table.

use crate::player::Move;
use crate::position::GamePosition;
use crate::values::PositionValues;

/// A legal move paired with the mover's win probability after playing it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveValue {
    pub mv: Move,
    pub value: f32,
}

/// Anything that can rank the moves of a position. The solved table
/// implements this directly; a network-backed lookup would implement the
/// same seam.
pub trait PositionAnalyzer {
    /// All legal moves sorted from best to worst.
    fn analyze(&self, position: GamePosition, roll: usize) -> Vec<MoveValue>;

    /// The best move, if any move is legal.
    fn best_move(&self, position: GamePosition, roll: usize) -> Option<Move> {
        self.analyze(position, roll).first().map(|mv| mv.mv)
    }
}

impl PositionAnalyzer for PositionValues {
    fn analyze(&self, position: GamePosition, roll: usize) -> Vec<MoveValue> {
        let mut values = evaluate_moves(self, position, roll);
        values.sort_by(|a, b| b.value.total_cmp(&a.value));
        values
    }
}

impl PositionValues {
    /// For each roll 1..=4, the index of the best move within that roll's
    /// move list, or 0 when no move is legal. This is the per-position
    /// policy consumed by the export pipeline.
    pub fn policy(&self, position: GamePosition) -> [u8; 4] {
        let mut policy = [0u8; 4];
        for roll in 1..=4 {
            let values = evaluate_moves(self, position, roll);
            let best = values
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.value.total_cmp(&b.1.value))
                .map(|(i, _)| i)
                .unwrap_or(0);
            policy[roll - 1] = best as u8;
        }
        policy
    }
}

/// Value each move from the mover's perspective: the child's value is
/// complemented whenever the turn passes to the opponent.
fn evaluate_moves(values: &PositionValues, position: GamePosition, roll: usize) -> Vec<MoveValue> {
    position
        .moves(roll)
        .into_iter()
        .map(|mv| {
            let (next, passes) = position.with_move(mv);
            let value = values.value_of(next);
            MoveValue {
                mv,
                value: if passes { 1.0 - value } else { value },
            }
        })
        .collect()
}
