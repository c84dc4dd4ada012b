//! Move-selection strategies and head-to-head tournaments.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::analyzer::PositionAnalyzer;
use crate::game::{GameModel, PlayerColor};
use crate::player::Move;
use crate::position::GamePosition;
use crate::rules::{self, SPACE_COUNT};

/// A way of choosing a move given a position and a roll.
pub trait Strategy {
    fn choose(&mut self, position: GamePosition, roll: usize) -> Option<Move>;
}

/// Plays the optimal move from a solved analyzer.
pub struct AnalysisStrategy<'a> {
    analyzer: &'a dyn PositionAnalyzer,
}

impl<'a> AnalysisStrategy<'a> {
    pub fn new(analyzer: &'a dyn PositionAnalyzer) -> Self {
        AnalysisStrategy { analyzer }
    }
}

impl Strategy for AnalysisStrategy<'_> {
    fn choose(&mut self, position: GamePosition, roll: usize) -> Option<Move> {
        self.analyzer.best_move(position, roll)
    }
}

/// Move categories from least to most desirable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MoveKind {
    Simple,
    EnterBoard,
    ExitBoard,
    OccupyRosette,
    CapturePiece,
}

fn kind(position: GamePosition, mv: Move) -> MoveKind {
    if rules::is_shared(mv.to) && position.defender().occupies(mv.to) {
        MoveKind::CapturePiece
    } else if rules::is_rosette(mv.to) {
        MoveKind::OccupyRosette
    } else if mv.to as usize == SPACE_COUNT {
        MoveKind::ExitBoard
    } else if mv.is_entry() {
        MoveKind::EnterBoard
    } else {
        MoveKind::Simple
    }
}

/// Greedy baseline: capture > rosette > exit > enter > plain advance, ties
/// broken by the most advanced piece.
pub struct HeuristicStrategy;

impl Strategy for HeuristicStrategy {
    fn choose(&mut self, position: GamePosition, roll: usize) -> Option<Move> {
        position
            .moves(roll)
            .into_iter()
            .max_by_key(|&mv| (kind(position, mv), mv.from))
    }
}

/// Uniformly random baseline.
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new(seed: u64) -> Self {
        RandomStrategy {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn choose(&mut self, position: GamePosition, roll: usize) -> Option<Move> {
        position.moves(roll).choose(&mut self.rng).copied()
    }
}

/// Play a single game between two strategies; returns the winner's index.
pub fn play_game(
    players: &mut [&mut dyn Strategy; 2],
    rng: &mut impl Rng,
) -> usize {
    let mut game = GameModel::new(PlayerColor::random(rng));
    while !game.is_over() {
        let player = game.player_to_move().index();
        let roll = game.roll_dice(rng);
        let mv = players[player].choose(game.position(), roll);
        game.make_move(mv);
    }
    game.winner().index()
}

/// Play `games` games and return the first player's win percentage.
pub fn play_tournament(
    players: &mut [&mut dyn Strategy; 2],
    games: usize,
    seed: u64,
) -> f64 {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut wins = [0usize; 2];
    for _ in 0..games {
        wins[play_game(players, &mut rng)] += 1;
    }
    100.0 * wins[0] as f64 / games as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerPosition;

    #[test]
    fn heuristic_prefers_capture() {
        // Attacker on 4 can capture on 5 or enter from the pool.
        let position = GamePosition::new(
            PlayerPosition::new(1 << 4, 3),
            PlayerPosition::new(1 << 5, 0),
        );
        let mv = HeuristicStrategy.choose(position, 1).unwrap();
        assert_eq!(mv, Move::new(4, 5));
    }

    #[test]
    fn random_games_terminate() {
        let mut a = RandomStrategy::new(1);
        let mut b = RandomStrategy::new(2);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..5 {
            let winner = play_game(&mut [&mut a, &mut b], &mut rng);
            assert!(winner < 2);
        }
    }

    #[test]
    fn heuristic_beats_random() {
        let mut h = HeuristicStrategy;
        let mut r = RandomStrategy::new(11);
        let pct = play_tournament(&mut [&mut h, &mut r], 200, 42);
        assert!(pct > 55.0, "heuristic won only {pct:.1}%");
    }
}
